/// Turns a per-item failure into a log line so the caller can move on.
pub trait ResultOkLogExt<T, E> {
    /// Logs the error under `target` and discards it.
    fn ok_log(self, target: &'static str) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self, target: &'static str) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!(target: target, "{err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_log() {
        let ok: Result<u8, std::io::Error> = Ok(1);
        assert_eq!(ok.ok_log("test"), Some(1));

        let err: Result<u8, std::io::Error> = Err(std::io::Error::other("boom"));
        assert_eq!(err.ok_log("test"), None);
    }
}

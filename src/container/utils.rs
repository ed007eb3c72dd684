/// Checks whether `src` can be joined onto a directory without leaving it.
///
/// Returns `false` for the empty string, `.` and `..`, and for anything
/// containing a `/` or a NUL byte.
pub(super) fn is_single_path_component(src: &str) -> bool {
    !src.is_empty() && src != "." && src != ".." && !src.bytes().any(|b| b == b'/' || b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_single_path_component() {
        assert!(is_single_path_component(
            "4f66ad9a0b2e7c1b8d3f0e5a6c9b2d1e4f66ad9a0b2e7c1b8d3f0e5a6c9b2d1e"
        ));
        assert!(is_single_path_component("web-1"));
        assert!(is_single_path_component("..."));

        assert!(!is_single_path_component(""));
        assert!(!is_single_path_component(".."));
        assert!(!is_single_path_component("/abc"));
    }
}

pub const WORK_DIR_NAME: &str = "project";

/// Default working directory of the WebContainer the assistant targets.
pub const WORK_DIR: &str = "/home/project";

/// Wrapper element for user file modifications described to the model.
pub const MODIFICATIONS_TAG_NAME: &str = "bolt_file_modifications";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_dir_is_built_from_name() {
        assert_eq!(WORK_DIR, format!("/home/{WORK_DIR_NAME}"));
    }
}

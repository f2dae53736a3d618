// Rendering constants
pub mod render {
    // Spaces per nesting level in the diagnostic rendering
    pub const INDENT_WIDTH: usize = 2;
    pub const INDENT_UNIT: &str = "  ";

    /// A newline followed by `level` indentation units.
    pub fn new_line(level: usize) -> String {
        let mut line = String::with_capacity(1 + level * INDENT_WIDTH);
        line.push('\n');
        for _ in 0..level {
            line.push_str(INDENT_UNIT);
        }
        line
    }
}

// Symbol table constants
pub mod symbols {
    use lazy_static::lazy_static;
    use regex::Regex;

    pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

    lazy_static! {
        pub static ref IDENTIFIER: Regex =
            Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is a valid regex");
    }

    pub fn is_valid_identifier(name: &str) -> bool {
        IDENTIFIER.is_match(name)
    }
}

// Rendering of the sentinel nodes
pub mod keywords {
    pub const ERROR_STATEMENT: &str = "ERROR";
    pub const ERROR_EXPRESSION: &str = "<error>";
    pub const SKIP: &str = "SKIP";
    pub const EXIT: &str = "EXIT";
}

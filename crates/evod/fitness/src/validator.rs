/// Static structural validation of kernel source, the cheapest gate.
pub struct StructuralValidator {
    required_constructs: Vec<String>,
    max_bytes: usize,
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self {
            required_constructs: vec!["@compute".into(), "fn main".into()],
            max_bytes: 64 * 1024,
        }
    }

    pub fn with_required_constructs(mut self, constructs: Vec<String>) -> Self {
        self.required_constructs = constructs;
        self
    }

    pub fn with_max_bytes(mut self, max: usize) -> Self {
        self.max_bytes = max;
        self
    }

    /// Returns every structural problem found; an empty list means valid.
    pub fn validate(&self, source: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if source.len() > self.max_bytes {
            errors.push(format!(
                "kernel is {} bytes, ceiling is {}",
                source.len(),
                self.max_bytes
            ));
        }

        for construct in &self.required_constructs {
            if !source.contains(construct.as_str()) {
                errors.push(format!("missing required construct: {}", construct));
            }
        }

        for (open, close, name) in [('(', ')', "parentheses"), ('{', '}', "braces"), ('[', ']', "brackets")]
        {
            let mut depth: i64 = 0;
            for ch in source.chars() {
                if ch == open {
                    depth += 1;
                } else if ch == close {
                    depth -= 1;
                    if depth < 0 {
                        break;
                    }
                }
            }
            if depth != 0 {
                errors.push(format!("unbalanced {}", name));
            }
        }

        errors
    }
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::new()
    }
}

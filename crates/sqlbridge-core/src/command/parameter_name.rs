/// Hands out `p0`, `p1`, ... in order.
///
/// One generator is shared by every command bound into the same parameter
/// bag so that names never repeat within one execution.
#[derive(Debug, Clone)]
pub struct ParameterNameGenerator {
    prefix: &'static str,
    next: usize,
}

impl ParameterNameGenerator {
    pub fn new() -> ParameterNameGenerator {
        ParameterNameGenerator::with_prefix("p")
    }

    pub fn with_prefix(prefix: &'static str) -> ParameterNameGenerator {
        ParameterNameGenerator { prefix, next: 0 }
    }

    pub fn generate_next(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Default for ParameterNameGenerator {
    fn default() -> Self {
        ParameterNameGenerator::new()
    }
}

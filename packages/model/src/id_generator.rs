use crc32fast::Hasher;

/// Generate a short, stable seed from a project id using CRC32
pub fn get_project_seed(project_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(project_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for pages, sections and elements within a project
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String, // Project seed (CRC32)
    count: u64,   // Sequential counter
}

impl IDGenerator {
    pub fn new(project_id: &str) -> Self {
        Self {
            seed: get_project_seed(project_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    ///
    /// When the counter is exhausted the generator moves to a derived seed
    /// and starts over, so it never wraps into ids it already handed out.
    pub fn new_id(&mut self) -> String {
        self.count = match self.count.checked_add(1) {
            Some(next) => next,
            None => {
                let exhausted = std::mem::take(&mut self.seed);
                self.seed = format!("{}x", exhausted);
                tracing::warn!(from = %exhausted, to = %self.seed, "id counter exhausted, reseeding");
                1
            }
        };
        format!("{}-{}", self.seed, self.count)
    }

    /// Record an id that already exists so later ids never repeat it
    pub fn observe(&mut self, id: &str) {
        let Some(suffix) = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            return;
        };

        if let Ok(n) = suffix.parse::<u64>() {
            self.count = self.count.max(n);
        }
    }

    /// Get project seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

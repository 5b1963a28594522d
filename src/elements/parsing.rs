use crate::error::ConjunctionError;

/// One object's element set, keyed by the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitalElementSet {
    raw: String,
    name: String,
    line1: String,
    line2: String,
}

impl OrbitalElementSet {
    /// Splits `raw` into trimmed, non-empty lines. With three or more lines the
    /// first names the object; the last two are always the element lines.
    pub fn parse(raw: &str) -> Result<Self, ConjunctionError> {
        let lines: Vec<&str> = raw
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() < 2 {
            return Err(ConjunctionError::MalformedElementSet(format!(
                "expected 2 element lines, found {}",
                lines.len()
            )));
        }

        let line1 = lines[lines.len() - 2].to_string();
        let line2 = lines[lines.len() - 1].to_string();
        let name = if lines.len() >= 3 {
            lines[0].to_string()
        } else {
            placeholder_name(&line1)
        };

        Ok(Self {
            raw: raw.to_string(),
            name,
            line1,
            line2,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }
}

fn placeholder_name(line1: &str) -> String {
    match line1.get(2..7).map(str::trim) {
        Some(catalog) if !catalog.is_empty() => format!("NORAD {}", catalog),
        _ => "UNNAMED".to_string(),
    }
}

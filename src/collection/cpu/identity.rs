//! Processor identification: vendor, name, and the family/model/stepping
//! triple.

use std::sync::OnceLock;

use regex::Regex;

const UNKNOWN: &str = "?";

/// Describes the processor. Fields that were never set are derived from the
/// others where possible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorIdentity {
    vendor: String,
    name: String,
    identifier: Option<String>,
    family: Option<String>,
    model: Option<String>,
    stepping: Option<String>,
    vendor_freq: Option<u64>,
    cpu64: bool,
}

impl ProcessorIdentity {
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_stepping(mut self, stepping: impl Into<String>) -> Self {
        self.stepping = Some(stepping.into());
        self
    }

    pub fn with_vendor_freq(mut self, hertz: u64) -> Self {
        self.vendor_freq = Some(hertz);
        self
    }

    pub fn with_cpu64(mut self, cpu64: bool) -> Self {
        self.cpu64 = cpu64;
        self
    }

    /// The vendor string, e.g. `GenuineIntel`.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// The marketing name, e.g. `Intel(R) Core(TM) i7-3720QM CPU @ 2.60GHz`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_cpu64bit(&self) -> bool {
        self.cpu64
    }

    /// The identifier, e.g. `Intel64 Family 6 Model 58 Stepping 9`. Built
    /// from the other fields if one was not given.
    pub fn identifier(&self) -> String {
        match &self.identifier {
            Some(identifier) => identifier.clone(),
            None => {
                let arch = if self.vendor == "GenuineIntel" {
                    if self.cpu64 { "Intel64" } else { "x86" }
                } else {
                    self.vendor.as_str()
                };

                format!(
                    "{arch} Family {} Model {} Stepping {}",
                    self.family(),
                    self.model(),
                    self.stepping()
                )
            }
        }
    }

    pub fn family(&self) -> String {
        self.field_or_parsed(&self.family, "Family")
    }

    pub fn model(&self) -> String {
        self.field_or_parsed(&self.model, "Model")
    }

    pub fn stepping(&self) -> String {
        self.field_or_parsed(&self.stepping, "Stepping")
    }

    fn field_or_parsed(&self, field: &Option<String>, keyword: &str) -> String {
        match (field, &self.identifier) {
            (Some(value), _) => value.clone(),
            (None, Some(identifier)) => parse_identifier(identifier, keyword).to_string(),
            (None, None) => UNKNOWN.to_string(),
        }
    }

    /// The advertised frequency in hertz. Parsed from the trailing
    /// `@ 2.60GHz` of the name if not given.
    pub fn vendor_freq(&self) -> Option<u64> {
        self.vendor_freq.or_else(|| {
            let (_, freq) = self.name.rsplit_once('@')?;
            parse_hertz(freq.trim())
        })
    }
}

impl std::fmt::Display for ProcessorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Returns the whitespace-separated token following `keyword`, or an empty
/// string if `keyword` is not present.
fn parse_identifier<'a>(identifier: &'a str, keyword: &str) -> &'a str {
    let mut tokens = identifier.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == keyword {
            return tokens.next().unwrap_or_default();
        }
    }
    ""
}

/// Parses strings like `2.60GHz` or `800 MHz` into hertz.
pub fn parse_hertz(value: &str) -> Option<u64> {
    static HERTZ: OnceLock<Regex> = OnceLock::new();
    let regex = HERTZ.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)\s*([kMGT]?Hz)$").expect("the hertz regex should be valid")
    });

    let captures = regex.captures(value)?;
    let number: f64 = captures.get(1)?.as_str().parse().ok()?;
    let multiplier = match captures.get(2)?.as_str() {
        "Hz" => 1.0,
        "kHz" => 1e3,
        "MHz" => 1e6,
        "GHz" => 1e9,
        "THz" => 1e12,
        _ => return None,
    };

    Some((number * multiplier).round() as u64)
}

//! Routing of member-function definitions to topical output files.
//!
//! A definition is assigned to exactly one [`Category`] by walking the
//! ordered rule table in [`rules`]; the first rule that matches wins and
//! anything unmatched stays in the original file ([`Category::Residual`]).

pub mod rules;

use std::fmt;

pub use rules::{classify, classify_with_rule, ClassificationRule, RULES};

/// Output destination for a definition.
///
/// Variants are declared in output-file order; `Residual` is last and is
/// never written as a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Device lifecycle and interface methods
    Device,
    /// Bus communication and response handling
    Communication,
    /// State queries: is*/get*/was*/check*
    State,
    /// Configuration and settings management
    Configuration,
    /// Event group and notification handling
    Event,
    /// Sensor-specific operations and mappings
    Sensor,
    /// Left in place in the original source
    Residual,
}

impl Category {
    /// Every category, in output order.
    pub const ALL: [Category; 7] = [
        Category::Device,
        Category::Communication,
        Category::State,
        Category::Configuration,
        Category::Event,
        Category::Sensor,
        Category::Residual,
    ];

    /// Categories that produce a file of their own.
    pub fn splittable() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| !c.is_residual())
    }

    pub fn is_residual(self) -> bool {
        matches!(self, Category::Residual)
    }

    /// Appended to the class name to form the output file stem.
    /// The residual category maps to the original file itself.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Category::Device => "Device",
            Category::Communication => "Modbus",
            Category::State => "State",
            Category::Configuration => "Config",
            Category::Event => "Events",
            Category::Sensor => "Sensor",
            Category::Residual => "",
        }
    }

    /// One-line purpose used in the generated file header.
    pub fn description(self) -> &'static str {
        match self {
            Category::Device => "IDeviceInstance interface implementation",
            Category::Communication => "Modbus communication and response handling",
            Category::State => "State query and status methods",
            Category::Configuration => "Configuration and settings management",
            Category::Event => "Event group and notification handling",
            Category::Sensor => "Sensor-specific operations and mappings",
            Category::Residual => "Core implementation",
        }
    }

    /// File name for this category, e.g. `MB8ARTConfig.cpp`.
    pub fn file_name(self, class_name: &str, extension: &str) -> String {
        format!("{}{}.{}", class_name, self.file_suffix(), extension)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Device => "device",
            Category::Communication => "communication",
            Category::State => "state",
            Category::Configuration => "configuration",
            Category::Event => "event",
            Category::Sensor => "sensor",
            Category::Residual => "residual",
        };
        f.write_str(label)
    }
}

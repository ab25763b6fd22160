//! Ordered classification rules.
//!
//! Each rule is a predicate over `(name, return_type)`. Rules are evaluated
//! top to bottom and the first match decides the category, so a name that
//! fits several vocabularies (e.g. `isSensorReady`) is settled by position
//! in [`RULES`], never by scoring.

use super::Category;

/// A single predicate -> category entry of the rule table.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Short identifier shown in debug output
    pub label: &'static str,
    pub category: Category,
    pub matches: fn(name: &str, return_type: &str) -> bool,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("label", &self.label)
            .field("category", &self.category)
            .finish()
    }
}

/// The rule table, in evaluation order.
pub static RULES: &[ClassificationRule] = &[
    ClassificationRule {
        label: "device-interface",
        category: Category::Device,
        matches: is_device_interface,
    },
    ClassificationRule {
        label: "communication",
        category: Category::Communication,
        matches: is_communication,
    },
    ClassificationRule {
        label: "state-query",
        category: Category::State,
        matches: is_state_query,
    },
    ClassificationRule {
        label: "configuration",
        category: Category::Configuration,
        matches: is_configuration,
    },
    ClassificationRule {
        label: "event",
        category: Category::Event,
        matches: is_event,
    },
    ClassificationRule {
        label: "sensor",
        category: Category::Sensor,
        matches: is_sensor,
    },
];

/// Categorize a definition by its identifier and declared return type.
pub fn classify(name: &str, return_type: &str) -> Category {
    classify_with_rule(name, return_type)
        .map(|rule| rule.category)
        .unwrap_or(Category::Residual)
}

/// Like [`classify`], but reports which rule fired.
pub fn classify_with_rule(name: &str, return_type: &str) -> Option<&'static ClassificationRule> {
    RULES.iter().find(|rule| (rule.matches)(name, return_type))
}

pub(crate) fn is_device_interface(name: &str, return_type: &str) -> bool {
    const DEVICE_METHODS: &[&str] = &[
        "initialize",
        "getDeviceType",
        "getStatus",
        "getLastError",
        "performSelfTest",
        "requestData",
        "processData",
        "getData",
        "waitForInitializationComplete",
        "performAction",
        "waitForData",
        "waitForInitialization",
        "registerCallback",
        "unregisterCallbacks",
        "setEventNotification",
    ];
    return_type.contains("IDeviceInstance::") || DEVICE_METHODS.contains(&name)
}

pub(crate) fn is_communication(name: &str, _return_type: &str) -> bool {
    const LOWERCASE_TERMS: &[&str] = &["modbus", "response", "handle", "validate"];
    const EXACT_CASE_TERMS: &[&str] = &["onAsync", "readSensor", "readAll", "sendRequest"];

    let lower = name.to_lowercase();
    LOWERCASE_TERMS.iter().any(|term| lower.contains(term))
        || EXACT_CASE_TERMS.iter().any(|term| name.contains(term))
}

pub(crate) fn is_state_query(name: &str, _return_type: &str) -> bool {
    const PREFIXES: &[&str] = &["is", "get", "was", "check"];
    const EXCLUDED: &[&str] = &["Event", "Bit", "Enum"];
    const STATUS_PRINTERS: &[&str] = &["printSensorStatus", "printModuleSettings"];

    let prefixed = PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        && !EXCLUDED.iter().any(|term| name.contains(term));
    prefixed || STATUS_PRINTERS.contains(&name)
}

pub(crate) fn is_configuration(name: &str, _return_type: &str) -> bool {
    const TERMS: &[&str] = &[
        "set",
        "req",
        "initializeModule",
        "Settings",
        "BaudRate",
        "Parity",
        "Address",
        "Factory",
        "ToString",
        "Enum",
        "Stored",
    ];
    TERMS.iter().any(|term| name.contains(term))
}

pub(crate) fn is_event(name: &str, _return_type: &str) -> bool {
    const TERMS: &[&str] = &["Event", "Bit", "notification"];
    TERMS.iter().any(|term| name.contains(term))
}

pub(crate) fn is_sensor(name: &str, _return_type: &str) -> bool {
    const TERMS: &[&str] = &[
        "Sensor", "sensor", "Mapping", "mapping", "process", "control", "measure",
    ];
    TERMS.iter().any(|term| name.contains(term))
}

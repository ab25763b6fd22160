// Shared fixtures for unitsplit integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Head of the fixture that stays untouched by a split and a removal:
/// file comment, includes and a constructor with an initializer list.
pub const DRIVER_HEAD: &str = r#"/**
 * @file MB8ART.cpp
 * @brief Driver for the MB8ART 8-channel temperature module
 */

#include "MB8ART.h"
#include <MutexGuard.h>

using namespace mb8art;

MB8ART::MB8ART(uint8_t address, const char* tag)
    : QueuedModbusDevice(address), tag(tag) {
}
"#;

/// Definitions that get relocated, one per category.
pub const DRIVER_MOVED: &str = r#"
// Device interface
IDeviceInstance::DeviceResult<void> MB8ART::initialize() {
    if (initialized) {
        return IDeviceInstance::DeviceResult<void>();
    }
    initialized = true;
    return IDeviceInstance::DeviceResult<void>();
}

bool MB8ART::isInitialized() const {
    return initialized;
}

/**
 * Handle a Modbus response
 */
void MB8ART::handleModbusResponse(uint8_t functionCode, const uint8_t* data, uint16_t length) {
    if (length == 0) {
        return;
    }
    for (uint16_t i = 0; i < length; ++i) {
        buffer[i] = data[i];
    }
}

bool MB8ART::setBaudRate(uint32_t baud) {
    baudRate = baud;
    return true;
}

void MB8ART::updateEventBits(uint32_t bits) {
    xEventGroupSetBits(eventGroup, bits);
}

float MB8ART::processTemperature(int16_t raw) const {
    return raw / 10.0f;
}

"#;

/// Residual definition at the end of the file.
pub const DRIVER_TAIL: &str = r#"void MB8ART::logWarnings() {
    log("warn");
}
"#;

pub const LIBRARY_JSON: &str = r#"{
  "name": "MB8ART",
  "version": "1.0.0",
  "build": {
    "srcFilter": [
      "+<MB8ART.cpp>"
    ]
  }
}
"#;

pub fn driver_source() -> String {
    format!("{DRIVER_HEAD}{DRIVER_MOVED}{DRIVER_TAIL}")
}

/// Text left behind once every relocated definition is removed.
pub fn driver_after_removal() -> String {
    format!("{DRIVER_HEAD}\n{DRIVER_TAIL}")
}

/// A library checkout: `library.json` at the root, the driver under `src/`.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/MB8ART.cpp"), driver_source()).unwrap();
        fs::write(dir.path().join("library.json"), LIBRARY_JSON).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn src(&self, name: &str) -> PathBuf {
        self.dir.path().join("src").join(name)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }
}

pub const GENERATED_FILES: &[&str] = &[
    "MB8ARTDevice.cpp",
    "MB8ARTModbus.cpp",
    "MB8ARTState.cpp",
    "MB8ARTConfig.cpp",
    "MB8ARTEvents.cpp",
    "MB8ARTSensor.cpp",
];

//! `IDriftReaderStub` — in-memory test double for `IDriftReader`.
//!
//! Used by bridge tests to avoid creating real drift.db connections.

use crate::errors::StorageError;
use std::collections::HashMap;
use std::sync::Mutex;

use super::drift_reader::IDriftReader;

/// In-memory stub implementation of `IDriftReader`.
///
/// All methods return `Ok(None)` or `Ok(0)` by default. Use the `set_*`
/// methods to configure return values for specific inputs.
pub struct IDriftReaderStub {
    pattern_confidences: Mutex<HashMap<String, f64>>,
    occurrence_rates: Mutex<HashMap<String, f64>>,
    false_positive_rates: Mutex<HashMap<String, f64>>,
    contract_confidences: Mutex<HashMap<String, f64>>,
    crypto_health_values: Mutex<HashMap<String, f64>>,
    matching_pattern_count: Mutex<Option<u32>>,
    latest_scan: Mutex<Option<String>>,
}

impl IDriftReaderStub {
    /// Create a new stub with all methods returning defaults.
    pub fn new() -> Self {
        Self {
            pattern_confidences: Mutex::new(HashMap::new()),
            occurrence_rates: Mutex::new(HashMap::new()),
            false_positive_rates: Mutex::new(HashMap::new()),
            contract_confidences: Mutex::new(HashMap::new()),
            crypto_health_values: Mutex::new(HashMap::new()),
            matching_pattern_count: Mutex::new(None),
            latest_scan: Mutex::new(None),
        }
    }

    pub fn set_pattern_confidence(&self, pattern_id: &str, value: f64) {
        self.pattern_confidences.lock().unwrap().insert(pattern_id.to_string(), value);
    }

    pub fn set_occurrence_rate(&self, pattern_id: &str, value: f64) {
        self.occurrence_rates.lock().unwrap().insert(pattern_id.to_string(), value);
    }

    pub fn set_false_positive_rate(&self, pattern_id: &str, value: f64) {
        self.false_positive_rates.lock().unwrap().insert(pattern_id.to_string(), value);
    }

    pub fn set_contract_confidence(&self, contract_id: &str, value: f64) {
        self.contract_confidences.lock().unwrap().insert(contract_id.to_string(), value);
    }

    pub fn set_crypto_health(&self, file_prefix: &str, value: f64) {
        self.crypto_health_values.lock().unwrap().insert(file_prefix.to_string(), value);
    }

    pub fn set_matching_pattern_count(&self, count: u32) {
        *self.matching_pattern_count.lock().unwrap() = Some(count);
    }

    pub fn set_latest_scan_timestamp(&self, ts: &str) {
        *self.latest_scan.lock().unwrap() = Some(ts.to_string());
    }
}

impl Default for IDriftReaderStub {
    fn default() -> Self {
        Self::new()
    }
}

impl IDriftReader for IDriftReaderStub {
    fn pattern_confidence(&self, pid: &str) -> Result<Option<f64>, StorageError> {
        Ok(self.pattern_confidences.lock().unwrap().get(pid).copied())
    }
    fn pattern_occurrence_rate(&self, pid: &str) -> Result<Option<f64>, StorageError> {
        Ok(self.occurrence_rates.lock().unwrap().get(pid).copied())
    }
    fn false_positive_rate(&self, pid: &str) -> Result<Option<f64>, StorageError> {
        Ok(self.false_positive_rates.lock().unwrap().get(pid).copied())
    }
    fn contract_confidence(&self, cid: &str) -> Result<Option<f64>, StorageError> {
        Ok(self.contract_confidences.lock().unwrap().get(cid).copied())
    }
    fn crypto_health(&self, file_prefix: &str) -> Result<Option<f64>, StorageError> {
        Ok(self.crypto_health_values.lock().unwrap().get(file_prefix).copied())
    }
    fn count_matching_patterns(&self, _pids: &[String]) -> Result<u32, StorageError> {
        Ok(self.matching_pattern_count.lock().unwrap().unwrap_or(0))
    }
    fn latest_scan_timestamp(&self) -> Result<Option<String>, StorageError> {
        Ok(self.latest_scan.lock().unwrap().clone())
    }
}

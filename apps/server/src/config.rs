// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use wallscan_lines::ConsolidationConfig;
use wallscan_raster::RasterConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Maximum upload size in MB.
    pub max_file_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Consolidation applied to detected lines.
    pub consolidation: ConsolidationConfig,
    /// Raw line detection tuning.
    pub raster: RasterConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            max_file_size_mb: std::env::var("MAX_FILE_SIZE_MB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_file_size_mb),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            consolidation: ConsolidationConfig {
                delta_theta: std::env::var("DELTA_THETA")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.consolidation.delta_theta),
                delta_rho: std::env::var("DELTA_RHO")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.consolidation.delta_rho),
                min_parallel_lines: std::env::var("MIN_PARALLEL_LINES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.consolidation.min_parallel_lines),
                ..defaults.consolidation
            },
            raster: defaults.raster,
        }
    }

    /// Upload limit in bytes.
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            max_file_size_mb: 50,
            request_timeout_secs: 60,
            consolidation: ConsolidationConfig::final_output(),
            raster: RasterConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_final_output_preset() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.consolidation, ConsolidationConfig::final_output());
        assert_eq!(config.max_file_size_bytes(), 50 * 1024 * 1024);
    }
}

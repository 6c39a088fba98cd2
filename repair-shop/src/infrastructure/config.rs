use chrono::{FixedOffset, Local};
use infrastructure_common::config::CommonConfig;
use serde::Deserialize;

#[derive(Default, Clone, Deserialize, Debug)]
pub struct ShopConfig {
    #[serde(default, flatten)]
    pub common: CommonConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Default, Clone, Deserialize, Debug)]
pub struct ReportConfig {
    /// Calendar used to bucket reports, in minutes east of UTC. The server's local offset
    /// when unset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl ReportConfig {
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        match self.utc_offset_minutes {
            Some(minutes) => FixedOffset::east_opt(minutes * 60)
                .ok_or_else(|| anyhow::anyhow!("UTC offset of {minutes} minutes is out of range")),
            None => Ok(*Local::now().offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_common_section() {
        let config: ShopConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "db:\n  url: \"sqlite::memory:\"\nreport:\n  utc_offset_minutes: 420\n",
                config::FileFormat::Yaml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.common.db().url(), "sqlite::memory:");
        assert_eq!(config.report.offset().unwrap().local_minus_utc(), 7 * 3600);
        assert_eq!(config.common.session().sign_in_path(), "/sign-in");
    }

    #[test]
    fn offset_out_of_range() {
        let report = ReportConfig {
            utc_offset_minutes: Some(100 * 60),
        };
        assert!(report.offset().is_err());
    }
}

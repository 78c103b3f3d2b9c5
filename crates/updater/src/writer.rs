//! Addon data-file output.
//!
//! Serializes the per-variant summaries into the Lua data file the addon
//! loads: a single assignment embedding a JSON array, one record per
//! variant in ascending variant order.

use goldwatch_core::{config::OutputConfig, ItemVariant, MarketValueSummary, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// One record in the addon data array.
#[derive(Debug, Serialize)]
struct MarketValueRecord<'a> {
    item: u32,
    #[serde(rename = "bonusIds")]
    bonus_ids: &'a [u32],
    marketvalue: String,
    quantity: String,
    #[serde(rename = "MIN")]
    min: String,
}

/// Render the data-file body for the given summaries.
fn render(
    addon_variable: &str,
    summaries: &BTreeMap<ItemVariant, MarketValueSummary>,
) -> Result<String> {
    let records: Vec<MarketValueRecord> = summaries
        .iter()
        .map(|(variant, summary)| MarketValueRecord {
            item: variant.item_id,
            bonus_ids: &variant.bonus_ids,
            marketvalue: summary.market_value.to_string(),
            quantity: summary.quantity.to_string(),
            min: summary.min_price.to_string(),
        })
        .collect();

    Ok(format!(
        "{}_data = [{}]",
        addon_variable,
        serde_json::to_string(&records)?
    ))
}

/// Write the addon data file, returning its path.
///
/// The file lands at
/// `{wow_directory}/_retail_/Interface/AddOns/{addon_name}/data.lua`;
/// missing directories are created.
pub fn write_addon_data(
    config: &OutputConfig,
    summaries: &BTreeMap<ItemVariant, MarketValueSummary>,
) -> Result<PathBuf> {
    let addon_dir = config
        .wow_directory
        .join("_retail_")
        .join("Interface")
        .join("AddOns")
        .join(&config.addon_name);
    fs::create_dir_all(&addon_dir)?;

    let path = addon_dir.join("data.lua");
    let body = render(&config.addon_name.to_lowercase(), summaries)?;
    fs::write(&path, body)?;

    info!(
        path = %path.display(),
        variants = summaries.len(),
        "wrote addon data file"
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_summaries() -> BTreeMap<ItemVariant, MarketValueSummary> {
        let mut summaries = BTreeMap::new();
        summaries.insert(
            ItemVariant::new(100, vec![]),
            MarketValueSummary {
                market_value: 0.8,
                quantity: 6,
                min_price: 0.8,
            },
        );
        summaries
    }

    #[test]
    fn test_render_single_variant() {
        let body = render("goldwatch", &make_summaries()).unwrap();
        assert_eq!(
            body,
            r#"goldwatch_data = [[{"item":100,"bonusIds":[],"marketvalue":"0.8","quantity":"6","MIN":"0.8"}]]"#
        );
    }

    #[test]
    fn test_render_empty_summaries() {
        let body = render("goldwatch", &BTreeMap::new()).unwrap();
        assert_eq!(body, "goldwatch_data = [[]]");
    }

    #[test]
    fn test_render_orders_variants() {
        let mut summaries = make_summaries();
        summaries.insert(
            ItemVariant::new(42, vec![7, 3]),
            MarketValueSummary {
                market_value: 12.5,
                quantity: 2,
                min_price: 11.0,
            },
        );

        let body = render("goldwatch", &summaries).unwrap();
        let item_42 = body.find(r#""item":42"#).unwrap();
        let item_100 = body.find(r#""item":100"#).unwrap();
        assert!(item_42 < item_100);
        assert!(body.contains(r#""bonusIds":[7,3]"#));
    }

    #[test]
    fn test_write_addon_data_creates_file() {
        let config = OutputConfig {
            wow_directory: std::env::temp_dir().join("goldwatch-writer-test"),
            addon_name: "GoldWatch".to_string(),
        };

        let path = write_addon_data(&config, &make_summaries()).unwrap();
        assert!(path.ends_with("_retail_/Interface/AddOns/GoldWatch/data.lua"));

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("goldwatch_data = ["));

        fs::remove_dir_all(&config.wow_directory).unwrap();
    }
}

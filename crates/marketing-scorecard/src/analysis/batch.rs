use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::profile::BusinessInput;

const LIST_SEPARATOR: char = ';';
const HANDLE_SEPARATOR: char = ':';

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read batch file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid batch CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads business rows from CSV for batch analysis.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<BusinessInput>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<BusinessInput>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut inputs = Vec::new();

        for record in csv_reader.deserialize::<BusinessRow>() {
            let row = record?;
            inputs.push(row.into_input());
        }

        Ok(inputs)
    }
}

#[derive(Debug, Deserialize)]
struct BusinessRow {
    name: String,
    industry: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    social_media: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_revenue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    marketing_budget: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    target_audience: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    channels: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    competitors: Option<String>,
}

impl BusinessRow {
    fn into_input(self) -> BusinessInput {
        BusinessInput {
            business_name: self.name,
            industry: self.industry,
            website: self.website,
            social_media: self
                .social_media
                .as_deref()
                .map(parse_handles)
                .unwrap_or_default(),
            monthly_revenue: self.monthly_revenue.as_deref().map(parse_amount),
            marketing_budget: self.marketing_budget.as_deref().map(parse_amount),
            target_audience: self.target_audience,
            channels: self.channels.as_deref().map(split_list).unwrap_or_default(),
            competitors: self
                .competitors
                .as_deref()
                .map(split_list)
                .unwrap_or_default(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `platform:handle` pairs; a platform without a handle is kept with an empty handle.
fn parse_handles(cell: &str) -> BTreeMap<String, String> {
    split_list(cell)
        .into_iter()
        .map(|entry| match entry.split_once(HANDLE_SEPARATOR) {
            Some((platform, handle)) => (platform.trim().to_string(), handle.trim().to_string()),
            None => (entry, String::new()),
        })
        .collect()
}

/// Amounts may carry a currency sign or thousands separators. Unparseable text becomes
/// NaN so profile validation rejects the row instead of silently treating it as absent.
fn parse_amount(cell: &str) -> f64 {
    let cleaned: String = cell
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "name,industry,website,social_media,monthly_revenue,marketing_budget,target_audience,channels,competitors\n\
Joe's Pizza Shop,Restaurant,,,\"$15,000\",500,,,\n\
TechStart Solutions,Technology,https://techstart-solutions.com,linkedin:techstart;twitter:techstart_io;facebook,50000,5000,Small business owners,LinkedIn;Content;Email,Acme IT\n";

    #[test]
    fn parses_rows_with_empty_cells_as_absent() {
        let inputs = BatchImporter::from_reader(SAMPLE.as_bytes()).expect("csv parses");
        assert_eq!(inputs.len(), 2);

        let pizza = &inputs[0];
        assert_eq!(pizza.business_name, "Joe's Pizza Shop");
        assert!(pizza.website.is_none());
        assert!(pizza.social_media.is_empty());
        assert_eq!(pizza.monthly_revenue, Some(15_000.0));
        assert_eq!(pizza.marketing_budget, Some(500.0));
        assert!(pizza.target_audience.is_none());
        assert!(pizza.channels.is_empty());
    }

    #[test]
    fn splits_lists_and_handles() {
        let inputs = BatchImporter::from_reader(SAMPLE.as_bytes()).expect("csv parses");
        let techstart = &inputs[1];
        assert_eq!(techstart.channels, vec!["LinkedIn", "Content", "Email"]);
        assert_eq!(techstart.competitors, vec!["Acme IT"]);
        assert_eq!(
            techstart.social_media.get("linkedin").map(String::as_str),
            Some("techstart")
        );
        assert_eq!(
            techstart.social_media.get("facebook").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn unparseable_amount_fails_validation_later() {
        assert!(parse_amount("lots").is_nan());
        assert_eq!(parse_amount("1,250.50"), 1_250.5);
    }
}

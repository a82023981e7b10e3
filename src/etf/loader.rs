//! Load ticker price history from CSV files
//!
//! Expects the common export format `Date,Close` with ISO dates, one row
//! per month, oldest first.

use chrono::NaiveDate;
use csv::Reader;
use std::error::Error;
use std::path::Path;

use super::prices::{PricePoint, PriceSeries};

/// Raw CSV row matching the provider export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: f64,
}

impl CsvRow {
    fn to_point(&self) -> Result<PricePoint, Box<dyn Error>> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| format!("bad date {:?}: {}", self.date, e))?;
        Ok(PricePoint {
            date,
            close: self.close,
        })
    }
}

/// Load a ticker's price series from a CSV file
pub fn load_price_series<P: AsRef<Path>>(
    ticker: &str,
    path: P,
) -> Result<PriceSeries, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_series(ticker, reader)
}

/// Load a price series from any reader (e.g., string buffer, network stream)
pub fn load_price_series_from_reader<R: std::io::Read>(
    ticker: &str,
    reader: R,
) -> Result<PriceSeries, Box<dyn Error>> {
    read_series(ticker, Reader::from_reader(reader))
}

fn read_series<R: std::io::Read>(
    ticker: &str,
    mut reader: Reader<R>,
) -> Result<PriceSeries, Box<dyn Error>> {
    let mut points = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        points.push(row.to_point()?);
    }

    let series = PriceSeries::new(ticker, points);
    series.validate()?;
    log::debug!("loaded {} closes for {}", series.len(), ticker);
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let csv = "Date,Close\n2024-01-01,100.0\n2024-02-01,110.0\n2024-03-01,121.0\n";
        let series = load_price_series_from_reader("VTI", csv.as_bytes()).unwrap();

        assert_eq!(series.ticker, "VTI");
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[0].close, 100.0);
        assert_eq!(
            series.points[2].date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_descending_dates_rejected() {
        let csv = "Date,Close\n2024-02-01,100.0\n2024-01-01,110.0\n";
        assert!(load_price_series_from_reader("VTI", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let csv = "Date,Close\nnot-a-date,100.0\n";
        assert!(load_price_series_from_reader("VTI", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_non_positive_close_rejected() {
        let csv = "Date,Close\n2024-01-01,-3.5\n";
        assert!(load_price_series_from_reader("VTI", csv.as_bytes()).is_err());
    }
}

use crate::table::DataError;
use crate::utils::{ensure_utf8, find_data_file, normalize_name};

use chrono::NaiveDate;
use itertools::Itertools;
use std::path::Path;

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%m/%d/%Y"];

/// The raw display dataset behind the historical-demand view. Only used for
/// aggregation, never for fitting.
#[derive(Debug, Default, Clone)]
pub struct HistoryData {
    pub date: Vec<NaiveDate>,
    pub season: Vec<String>,
    pub hour: Vec<u32>,
    pub count: Vec<f64>,
}

impl HistoryData {
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<HistoryData, DataError> {
        let path = find_data_file(&path)
            .ok_or_else(|| DataError::FileNotFound(path.as_ref().display().to_string()))?;
        let content = ensure_utf8(&path).map_err(|e| DataError::Encoding(e.to_string()))?;

        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(content.as_bytes());
        let headers = rdr.headers()?.clone();
        let col = |wanted: &str| {
            headers.iter().position(|h| normalize_name(h).starts_with(&normalize_name(wanted)))
        };

        let date_col = col("Date").ok_or(DataError::MissingColumn("Date".into()))?;
        let season_col = col("Seasons").ok_or(DataError::MissingColumn("Seasons".into()))?;
        let hour_col = col("Hour").ok_or(DataError::MissingColumn("Hour".into()))?;
        let count_col = col("Rented Bike Count")
            .ok_or(DataError::MissingColumn("Rented Bike Count".into()))?;

        let mut data = HistoryData::default();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let field = |c: usize| record.get(c).unwrap_or("").trim().to_string();

            data.date.push(parse_date(&field(date_col)).ok_or_else(|| DataError::BadCell {
                row: i + 1,
                column: "Date".into(),
                value: field(date_col),
            })?);
            data.season.push(field(season_col));
            data.hour.push(field(hour_col).parse().map_err(|_| DataError::BadCell {
                row: i + 1,
                column: "Hour".into(),
                value: field(hour_col),
            })?);
            data.count.push(field(count_col).parse().map_err(|_| DataError::BadCell {
                row: i + 1,
                column: "Rented Bike Count".into(),
                value: field(count_col),
            })?);
        }

        if data.date.is_empty() {
            return Err(DataError::Empty(path.display().to_string()));
        }
        Ok(data)
    }

    pub fn n_rows(&self) -> usize {
        self.date.len()
    }

    /// Season labels in order of first appearance, for season selectors.
    pub fn seasons(&self) -> Vec<String> {
        self.season.iter().unique().cloned().collect()
    }

    /// The (hour, count) series for one season, the raw data behind the
    /// historic-demand bars.
    pub fn filter_season(&self, season: &str) -> (Vec<u32>, Vec<f64>) {
        self.season
            .iter()
            .zip(self.hour.iter().zip(self.count.iter()))
            .filter(|(s, _)| s.eq_ignore_ascii_case(season))
            .map(|(_, (&h, &c))| (h, c))
            .unzip()
    }

    /// Mean rented count per hour of day for one season, sorted by hour.
    pub fn hourly_mean(&self, season: &str) -> Vec<(u32, f64)> {
        let (hours, counts) = self.filter_season(season);
        hours
            .into_iter()
            .zip(counts)
            .into_group_map()
            .into_iter()
            .map(|(hour, values)| {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (hour, mean)
            })
            .sorted_by_key(|&(hour, _)| hour)
            .collect()
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Date,Rented Bike Count,Hour,Temperature(C),Seasons,Holiday,Functioning Day
01/12/2017,254,0,-5.2,Winter,No Holiday,Yes
01/12/2017,204,1,-5.5,Winter,No Holiday,Yes
02/06/2018,820,0,18.2,Summer,No Holiday,Yes
02/06/2018,900,1,17.9,Summer,No Holiday,Yes
03/06/2018,880,0,19.1,Summer,No Holiday,Yes
";

    fn sample_data(name: &str) -> HistoryData {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        HistoryData::read_csv(&path).unwrap()
    }

    #[test]
    fn reads_display_dataset() {
        let data = sample_data("demandrs_history_read.csv");
        assert_eq!(data.n_rows(), 5);
        assert_eq!(data.date[0], NaiveDate::from_ymd_opt(2017, 12, 1).unwrap());
        assert_eq!(data.seasons(), vec!["Winter".to_string(), "Summer".to_string()]);
    }

    #[test]
    fn filters_one_season() {
        let data = sample_data("demandrs_history_filter.csv");
        let (hours, counts) = data.filter_season("Winter");
        assert_eq!(hours, vec![0, 1]);
        assert_eq!(counts, vec![254.0, 204.0]);
    }

    #[test]
    fn hourly_mean_aggregates_and_sorts() {
        let data = sample_data("demandrs_history_mean.csv");
        let profile = data.hourly_mean("Summer");
        assert_eq!(profile, vec![(0, 850.0), (1, 900.0)]);
    }
}

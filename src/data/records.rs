//! Record shapes for the three input files.

use super::loader::{DataLoader, LoaderError};
use chrono::NaiveDate;
use std::path::Path;

/// One observed post: `Platform,Likes`.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeObservation {
    pub platform: String,
    pub likes: f64,
}

/// Pre-aggregated average per platform and post type: `Platform,PostType,AvgLikes`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostTypeAverage {
    pub platform: String,
    pub post_type: String,
    pub avg_likes: f64,
}

/// Average likes for one day: `Date,AvgLikes`. `date` is `None` when the cell
/// could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAverage {
    pub date: Option<NaiveDate>,
    pub avg_likes: f64,
}

impl LikeObservation {
    pub fn load(path: &Path) -> Result<Vec<Self>, LoaderError> {
        let loader = DataLoader::load_csv(path)?;
        let platforms = loader.string_column("Platform")?;
        let likes = loader.f64_column("Likes")?;

        Ok(platforms
            .into_iter()
            .zip(likes)
            .map(|(platform, likes)| Self { platform, likes })
            .collect())
    }
}

impl PostTypeAverage {
    pub fn load(path: &Path) -> Result<Vec<Self>, LoaderError> {
        let loader = DataLoader::load_csv(path)?;
        let platforms = loader.string_column("Platform")?;
        let post_types = loader.string_column("PostType")?;
        let averages = loader.f64_column("AvgLikes")?;

        Ok(platforms
            .into_iter()
            .zip(post_types)
            .zip(averages)
            .map(|((platform, post_type), avg_likes)| Self {
                platform,
                post_type,
                avg_likes,
            })
            .collect())
    }
}

impl DailyAverage {
    pub fn load(path: &Path) -> Result<Vec<Self>, LoaderError> {
        let loader = DataLoader::load_csv(path)?;
        let dates = loader.date_column("Date")?;
        let averages = loader.f64_column("AvgLikes")?;

        Ok(dates
            .into_iter()
            .zip(averages)
            .map(|(date, avg_likes)| Self { date, avg_likes })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_post_type_averages_ignoring_extra_columns() {
        let file = write_csv(
            "Platform,PostType,AvgLikes,Note\n\
             Facebook,Image,512.5,x\n\
             Facebook,Video,610,y\n",
        );
        let rows = PostTypeAverage::load(file.path()).unwrap();

        assert_eq!(
            rows,
            vec![
                PostTypeAverage {
                    platform: "Facebook".into(),
                    post_type: "Image".into(),
                    avg_likes: 512.5,
                },
                PostTypeAverage {
                    platform: "Facebook".into(),
                    post_type: "Video".into(),
                    avg_likes: 610.0,
                },
            ]
        );
    }

    #[test]
    fn loads_daily_averages_with_invalid_dates() {
        let file = write_csv("Date,AvgLikes\n3/1/2024,100\nsoon,200\n3/3/2024,150\n");
        let rows = DailyAverage::load(file.path()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(rows[1].date, None);
        assert_eq!(rows[1].avg_likes, 200.0);
        assert_eq!(rows[2].date, NaiveDate::from_ymd_opt(2024, 3, 3));
    }

    #[test]
    fn loads_observations() {
        let file = write_csv("Platform,PostType,Date,Likes\nTwitter,Text,3/1/2024,42\n");
        let rows = LikeObservation::load(file.path()).unwrap();

        assert_eq!(
            rows,
            vec![LikeObservation {
                platform: "Twitter".into(),
                likes: 42.0,
            }]
        );
    }
}

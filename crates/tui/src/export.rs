//! Files written on the donor's behalf: receipt downloads and the CSV
//! export of the donation history.

use std::{fs, path::PathBuf};

use serde::Serialize;

use funding::DonationRecord;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct Row<'a> {
    donation_id: i64,
    campaign: String,
    category: String,
    amount: f64,
    date: &'a str,
    message: &'a str,
}

/// Persists a fetched receipt as
/// `<downloads_dir>/donation_receipt_<id>.pdf` and returns the path. The
/// bytes come from the backend as-is; this is the save-as-file side of the
/// retrieval.
pub fn receipt_file(downloads_dir: &str, donation_id: i64, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(downloads_dir)?;
    let path = PathBuf::from(downloads_dir).join(format!("donation_receipt_{donation_id}.pdf"));
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Writes the donor's joined donation rows to
/// `<downloads_dir>/donations_<donorId>.csv` and returns the path.
pub fn donations_csv(
    downloads_dir: &str,
    donor_id: i64,
    donations: &[DonationRecord],
) -> Result<PathBuf> {
    fs::create_dir_all(downloads_dir)?;
    let path = PathBuf::from(downloads_dir).join(format!("donations_{donor_id}.csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    for donation in donations {
        let date = donation
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        writer.serialize(Row {
            donation_id: donation.id,
            campaign: donation.campaign_key(),
            category: donation.category_key(),
            amount: donation.amount.to_major(),
            date: &date,
            message: donation.message.as_deref().unwrap_or(""),
        })?;
    }
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use funding::Money;
    use uuid::Uuid;

    fn record(id: i64, amount_minor: i64, title: &str) -> DonationRecord {
        DonationRecord {
            id,
            amount: Money::new(amount_minor),
            message: Some("Keep going!".to_string()),
            date: None,
            campaign_id: Some(id),
            campaign_title: Some(title.to_string()),
            campaign_category: Some("Charity".to_string()),
            campaign_goal: Some(Money::new(1000_00)),
            campaign_start: None,
            campaign_end: None,
        }
    }

    #[test]
    fn writes_one_row_per_donation() {
        let dir = std::env::temp_dir().join(format!("hoperaise_export_{}", Uuid::new_v4()));
        let donations = vec![record(1, 100_00, "Clean Water"), record(2, 50_00, "Books")];

        let path = donations_csv(&dir.display().to_string(), 7, &donations).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("donation_id,campaign,category,amount,date,message")
        );
        assert_eq!(lines.clone().count(), 2);
        assert!(content.contains("Clean Water"));
        assert!(path.ends_with("donations_7.csv"));
    }

    #[test]
    fn receipt_lands_under_the_expected_name() {
        let dir = std::env::temp_dir().join(format!("hoperaise_receipts_{}", Uuid::new_v4()));
        let path = receipt_file(&dir.display().to_string(), 42, b"%PDF-1.4").unwrap();

        assert!(path.ends_with("donation_receipt_42.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }
}

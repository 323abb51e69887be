use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub mod campaign {
    use super::*;

    /// A fundraising campaign as the backend serializes it.
    ///
    /// Amounts are plain JSON numbers in major units (rupees); the backend
    /// guarantees `0 <= collectedAmount <= goalAmount` for persisted rows.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Campaign {
        pub id: i64,
        pub title: String,
        pub description: Option<String>,
        pub category: Option<String>,
        pub goal_amount: f64,
        pub collected_amount: Option<f64>,
        /// `"Active"` campaigns are the only fundable ones.
        pub status: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }
}

pub mod donor {
    use super::*;

    /// The signed-in donor, as stored in the local session record.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Donor {
        pub id: i64,
        pub name: String,
    }
}

pub mod donation {
    use super::*;

    /// Request body for `POST /donation/add`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DonationNew {
        pub donor_id: i64,
        pub campaign_id: i64,
        pub amount: f64,
        pub message: String,
    }

    /// A persisted donation, joined with its campaign by the backend.
    ///
    /// Immutable once created; `donationDate` is server-assigned.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Donation {
        pub id: i64,
        pub amount: f64,
        pub message: Option<String>,
        /// Serialized without an offset (`yyyy-MM-ddTHH:mm:ss`).
        pub donation_date: Option<NaiveDateTime>,
        pub campaign: Option<super::campaign::Campaign>,
    }
}

pub mod admin {
    //! Aggregate counters for the admin dashboard.
    //!
    //! The four endpoints (`/admin/donorcount`, `/admin/creatorcount`,
    //! `/admin/campaigncount`, `/admin/donationsummary`) each return a bare
    //! JSON number, so there are no wrapper types to deserialize; consumers
    //! read them as `i64`/`f64` directly.

    use super::*;

    /// The counters combined, as the admin CLI prints them.
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct PlatformCounters {
        pub donors: i64,
        pub creators: i64,
        pub campaigns: i64,
        /// Lifetime sum of all donation amounts, in major units.
        pub donation_total: f64,
    }
}

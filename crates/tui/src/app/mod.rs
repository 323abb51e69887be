use std::collections::BTreeMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use api_types::{donation::DonationNew, donor::Donor};
use funding::{
    Campaign, CampaignCache, Confirmation, DonationRecord, FundingError, Money, catalog, rollup,
    validate,
};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    export,
    session::SessionStore,
    ui,
};

/// Category filters offered in the browse view; `All` passes everything.
pub const CATEGORY_FILTERS: [&str; 5] = ["All", "Startup", "Charity", "Sponsorship", "Healthcare"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Browse,
    Donations,
    History,
    Dashboard,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Browse => "Browse",
            Self::Donations => "My Donations",
            Self::History => "History",
            Self::Dashboard => "Dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Page-level message shown at the top of every section.
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BrowseState {
    pub search: String,
    pub search_focus: bool,
    /// Index into [`CATEGORY_FILTERS`].
    pub category: usize,
    /// Indices into the campaign cache, after search/category filtering.
    pub visible: Vec<usize>,
    pub selected: usize,
    pub error: Option<String>,
}

impl BrowseState {
    pub fn category_label(&self) -> &'static str {
        CATEGORY_FILTERS[self.category]
    }

    pub fn cycle_category(&mut self) {
        self.category = (self.category + 1) % CATEGORY_FILTERS.len();
    }

    /// Re-derives the visible list from the cache and current filters.
    pub fn refresh_visible(&mut self, cache: &CampaignCache) {
        self.visible = catalog::filter(cache.as_slice(), &self.search, self.category_label());
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.visible.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonateField {
    Amount,
    Message,
}

/// The donate form for one campaign. Exists only while the modal is open;
/// `in_flight` blocks a second submission until the first settles.
#[derive(Debug)]
pub struct DonateForm {
    pub campaign_id: i64,
    pub amount: String,
    pub message: String,
    pub focus: DonateField,
    pub error: Option<String>,
    pub in_flight: bool,
}

impl DonateForm {
    fn new(campaign_id: i64) -> Self {
        Self {
            campaign_id,
            amount: String::new(),
            message: String::new(),
            focus: DonateField::Amount,
            error: None,
            in_flight: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct DonationsState {
    pub items: Vec<DonationRecord>,
    pub error: Option<String>,
    pub loaded: bool,
}

#[derive(Debug, Default)]
pub struct HistoryState {
    pub selected: usize,
    pub busy: bool,
}

impl HistoryState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub server_total: Option<Money>,
    pub donation_count: usize,
    pub active_count: usize,
    pub top_campaign: Option<String>,
    pub by_category: BTreeMap<String, Money>,
    pub by_campaign: BTreeMap<String, Money>,
    pub error: Option<String>,
    pub loaded: bool,
}

#[derive(Debug)]
pub struct AppState {
    pub donor: Option<Donor>,
    pub section: Section,
    pub banner: Option<Banner>,
    pub cache: CampaignCache,
    pub browse: BrowseState,
    pub donate: Option<DonateForm>,
    pub donations: DonationsState,
    pub history: HistoryState,
    pub dashboard: DashboardState,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: SessionStore,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, sign_in: Option<Donor>) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let session = SessionStore::new(&config.session_path);

        if let Some(donor) = &sign_in {
            session.save(donor)?;
        }
        let donor = session.load()?;

        let state = AppState {
            donor,
            section: Section::Browse,
            banner: None,
            cache: CampaignCache::new(),
            browse: BrowseState::default(),
            donate: None,
            donations: DonationsState::default(),
            history: HistoryState::default(),
            dashboard: DashboardState::default(),
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            session,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.refresh_campaigns().await;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = ui::keymap::map_key(key);

        if self.state.donate.is_some() {
            self.handle_donate_key(action).await;
            return Ok(());
        }

        if self.state.browse.search_focus {
            self.handle_search_key(action);
            return Ok(());
        }

        match action {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Submit => match self.state.section {
                Section::Browse => self.open_donate_form(),
                Section::History => self.download_receipt().await,
                _ => {}
            },
            ui::keymap::AppAction::Up => self.select_prev(),
            ui::keymap::AppAction::Down => self.select_next(),
            ui::keymap::AppAction::Input(ch) => self.handle_section_key(ch).await?,
            _ => {}
        }

        Ok(())
    }

    async fn handle_section_key(&mut self, ch: char) -> Result<()> {
        match ch {
            'q' | 'Q' => {
                self.should_quit = true;
            }
            'b' | 'B' => {
                self.state.section = Section::Browse;
            }
            'm' | 'M' => {
                self.state.section = Section::Donations;
                if !self.state.donations.loaded {
                    self.load_donations().await;
                }
            }
            't' | 'T' => {
                self.state.section = Section::History;
                if !self.state.donations.loaded {
                    self.load_donations().await;
                }
            }
            'h' | 'H' => {
                self.state.section = Section::Dashboard;
                if !self.state.dashboard.loaded {
                    self.load_dashboard().await;
                }
            }
            'r' | 'R' => match self.state.section {
                Section::Browse => self.refresh_campaigns().await,
                Section::Donations | Section::History => self.load_donations().await,
                Section::Dashboard => self.load_dashboard().await,
            },
            '/' => {
                if self.state.section == Section::Browse {
                    self.state.browse.search_focus = true;
                }
            }
            'c' | 'C' => {
                if self.state.section == Section::Browse {
                    self.state.browse.cycle_category();
                    self.state.browse.refresh_visible(&self.state.cache);
                }
            }
            'e' | 'E' => {
                if self.state.section == Section::Donations {
                    self.export_donations();
                }
            }
            'j' | 'J' => self.select_next(),
            'k' | 'K' => self.select_prev(),
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, action: ui::keymap::AppAction) {
        match action {
            ui::keymap::AppAction::Cancel | ui::keymap::AppAction::Submit => {
                self.state.browse.search_focus = false;
            }
            ui::keymap::AppAction::Backspace => {
                self.state.browse.search.pop();
                self.state.browse.refresh_visible(&self.state.cache);
            }
            ui::keymap::AppAction::Input(ch) => {
                self.state.browse.search.push(ch);
                self.state.browse.refresh_visible(&self.state.cache);
            }
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    async fn handle_donate_key(&mut self, action: ui::keymap::AppAction) {
        match action {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Cancel => {
                let in_flight = self
                    .state
                    .donate
                    .as_ref()
                    .is_some_and(|form| form.in_flight);
                if !in_flight {
                    self.state.donate = None;
                }
            }
            ui::keymap::AppAction::NextField => {
                if let Some(form) = self.state.donate.as_mut() {
                    form.focus = match form.focus {
                        DonateField::Amount => DonateField::Message,
                        DonateField::Message => DonateField::Amount,
                    };
                }
            }
            ui::keymap::AppAction::Backspace => {
                if let Some(form) = self.state.donate.as_mut() {
                    match form.focus {
                        DonateField::Amount => form.amount.pop(),
                        DonateField::Message => form.message.pop(),
                    };
                }
            }
            ui::keymap::AppAction::Input(ch) => {
                if let Some(form) = self.state.donate.as_mut() {
                    match form.focus {
                        DonateField::Amount => {
                            if ch.is_ascii_digit() || ch == '.' || ch == ',' {
                                form.amount.push(ch);
                            }
                        }
                        DonateField::Message => form.message.push(ch),
                    }
                }
            }
            ui::keymap::AppAction::Submit => self.submit_donation().await,
            _ => {}
        }
    }

    fn select_next(&mut self) {
        match self.state.section {
            Section::Browse => self.state.browse.select_next(),
            Section::History => {
                let len = self.state.donations.items.len();
                self.state.history.select_next(len);
            }
            _ => {}
        }
    }

    fn select_prev(&mut self) {
        match self.state.section {
            Section::Browse => self.state.browse.select_prev(),
            Section::History => self.state.history.select_prev(),
            _ => {}
        }
    }

    /// The selected campaign in the browse view, through the filter.
    fn selected_campaign(&self) -> Option<&Campaign> {
        let index = *self.state.browse.visible.get(self.state.browse.selected)?;
        self.state.cache.as_slice().get(index)
    }

    /// Capacity and sign-in are checked before any input surface opens:
    /// a fully funded campaign has nothing valid to submit.
    fn open_donate_form(&mut self) {
        let Some((campaign_id, title, fully_funded)) = self
            .selected_campaign()
            .map(|c| (c.id, c.title.clone(), c.is_fully_funded()))
        else {
            return;
        };

        if self.state.donor.is_none() {
            self.state.banner = Some(Banner::error(validation_message(
                &FundingError::NotAuthenticated,
            )));
            return;
        }

        if fully_funded {
            self.state.banner = Some(Banner::error(validation_message(
                &FundingError::FullyFunded(title),
            )));
            return;
        }

        self.state.banner = None;
        self.state.donate = Some(DonateForm::new(campaign_id));
    }

    /// Writer one of the campaign cache: install the server's snapshot.
    async fn refresh_campaigns(&mut self) {
        match self.client.campaigns_all().await {
            Ok(dtos) => {
                let campaigns: std::result::Result<Vec<Campaign>, FundingError> =
                    dtos.into_iter().map(Campaign::try_from).collect();
                match campaigns {
                    Ok(campaigns) => {
                        self.state.cache.replace(catalog::fundable(campaigns));
                        self.state.browse.error = None;
                    }
                    Err(err) => {
                        self.state.browse.error =
                            Some(format!("Failed to fetch campaigns: {err}"));
                    }
                }
            }
            Err(err) => {
                self.state.browse.error = Some(format!(
                    "Failed to fetch campaigns: {}",
                    client_error_text(&err)
                ));
            }
        }
        self.state.browse.refresh_visible(&self.state.cache);
    }

    async fn load_donations(&mut self) {
        let Some(donor) = self.state.donor.clone() else {
            self.state.donations.error =
                Some("Please log in to view your donations.".to_string());
            self.state.donations.items.clear();
            return;
        };

        match self.client.donations_by_donor(donor.id).await {
            Ok(dtos) => {
                let records: std::result::Result<Vec<DonationRecord>, FundingError> =
                    dtos.into_iter().map(DonationRecord::try_from).collect();
                match records {
                    Ok(items) => {
                        self.state.donations.items = items;
                        self.state.donations.error = None;
                        self.state.donations.loaded = true;
                        let len = self.state.donations.items.len();
                        if self.state.history.selected >= len {
                            self.state.history.selected = len.saturating_sub(1);
                        }
                    }
                    Err(err) => {
                        self.state.donations.error =
                            Some(format!("Failed to load donations: {err}"));
                    }
                }
            }
            Err(_) => {
                self.state.donations.error = Some("Failed to load donations.".to_string());
            }
        }
    }

    async fn load_dashboard(&mut self) {
        let Some(donor) = self.state.donor.clone() else {
            self.state.dashboard.error =
                Some("Please log in to view your dashboard.".to_string());
            return;
        };

        if !self.state.donations.loaded {
            self.load_donations().await;
        }
        if self.state.cache.is_empty() {
            self.refresh_campaigns().await;
        }

        let donations = &self.state.donations.items;
        self.state.dashboard.donation_count = rollup::count(donations);
        self.state.dashboard.by_category = rollup::by_category(donations);
        self.state.dashboard.by_campaign = rollup::by_campaign_title(donations);
        self.state.dashboard.active_count = self.state.cache.len();
        self.state.dashboard.top_campaign =
            catalog::top_by_collected(self.state.cache.as_slice()).map(|c| c.title.clone());

        // The lifetime total comes from the server; the rollups above are
        // client-derived and may briefly disagree. The server wins.
        match self.client.donation_summary(donor.id).await {
            Ok(total) => match Money::try_from_major(total) {
                Ok(total) => {
                    self.state.dashboard.server_total = Some(total);
                    self.state.dashboard.error = None;
                }
                Err(err) => {
                    self.state.dashboard.error = Some(format!("Failed to load summary: {err}"));
                }
            },
            Err(err) => {
                self.state.dashboard.error = Some(format!(
                    "Failed to load summary: {}",
                    client_error_text(&err)
                ));
            }
        }
        self.state.dashboard.loaded = true;
    }

    /// One network write, guarded against concurrent re-entry; on success
    /// the cache is reconciled optimistically (writer two) and the next
    /// catalog refresh restores server truth.
    async fn submit_donation(&mut self) {
        let Some(form) = self.state.donate.as_ref() else {
            return;
        };
        if form.in_flight {
            return;
        }
        let campaign_id = form.campaign_id;
        let amount_input = form.amount.clone();
        let message = form.message.clone();

        // The identity may have vanished since the form opened; re-read it
        // rather than trusting the state captured at startup.
        let donor = self.session.load().unwrap_or(None);
        let Some(donor) = donor else {
            self.state.donor = None;
            let _ = self.session.clear();
            let text = "Session expired. Please log in again to donate.";
            self.set_form_error(text);
            self.state.banner = Some(Banner::error(text));
            return;
        };

        let Some(campaign) = self.state.cache.get(campaign_id).cloned() else {
            let text = validation_message(&FundingError::KeyNotFound(campaign_id.to_string()));
            self.set_form_error(&text);
            self.state.banner = Some(Banner::error(text));
            return;
        };

        // Defensive re-validation: the cached campaign may be stale.
        let amount = match validate(&campaign, Some(&donor), &amount_input) {
            Ok(amount) => amount,
            Err(err) => {
                let text = validation_message(&err);
                self.set_form_error(&text);
                self.state.banner = Some(Banner::error(text));
                return;
            }
        };

        if let Some(form) = self.state.donate.as_mut() {
            form.in_flight = true;
            form.error = None;
        }

        let payload = DonationNew {
            donor_id: donor.id,
            campaign_id,
            amount: amount.to_major(),
            message,
        };
        let outcome = self.client.donation_add(&payload).await;

        if let Some(form) = self.state.donate.as_mut() {
            form.in_flight = false;
        }

        match outcome {
            Ok(_donation) => {
                if let Err(err) = self.state.cache.record_donation(campaign_id, amount) {
                    tracing::warn!("reconciliation skipped: {err}");
                }
                self.state.browse.refresh_visible(&self.state.cache);

                let confirmation = Confirmation::new(&donor, &campaign, amount);
                self.state.banner = Some(Banner::success(format!(
                    "Thank you, {}! You donated {} to \"{}\".",
                    confirmation.donor_name, confirmation.amount, confirmation.campaign_title
                )));
                self.state.donate = None;
                // History and dashboard are stale now; refetch on next visit.
                self.state.donations.loaded = false;
                self.state.dashboard.loaded = false;
            }
            Err(err) => {
                let text = submit_error_message(&err);
                self.set_form_error(&text);
                self.state.banner = Some(Banner::error(text));
            }
        }
    }

    async fn download_receipt(&mut self) {
        if self.state.history.busy {
            return;
        }
        let Some(donation) = self
            .state
            .donations
            .items
            .get(self.state.history.selected)
        else {
            return;
        };
        let donation_id = donation.id;

        self.state.history.busy = true;
        let outcome = self.client.donation_receipt(donation_id).await;
        self.state.history.busy = false;

        match outcome {
            Ok(bytes) => {
                match export::receipt_file(&self.config.downloads_dir, donation_id, &bytes) {
                    Ok(path) => {
                        self.state.banner = Some(Banner::success(format!(
                            "Receipt downloaded successfully ({}).",
                            path.display()
                        )));
                    }
                    Err(err) => {
                        self.state.banner =
                            Some(Banner::error(format!("Failed to save receipt: {err}")));
                    }
                }
            }
            Err(ClientError::NotFound) => {
                self.state.banner = Some(Banner::error(
                    "Receipt not available for this donation (Donation not found).",
                ));
            }
            Err(ClientError::Server(_)) => {
                self.state.banner =
                    Some(Banner::error("Server error while generating receipt."));
            }
            Err(_) => {
                self.state.banner =
                    Some(Banner::error("Failed to download receipt. Please try again."));
            }
        }
    }

    fn export_donations(&mut self) {
        let Some(donor) = &self.state.donor else {
            self.state.banner = Some(Banner::error("Please log in to export your donations."));
            return;
        };

        match export::donations_csv(
            &self.config.downloads_dir,
            donor.id,
            &self.state.donations.items,
        ) {
            Ok(path) => {
                self.state.banner = Some(Banner::success(format!(
                    "Exported {} donations to {}.",
                    self.state.donations.items.len(),
                    path.display()
                )));
            }
            Err(err) => {
                self.state.banner = Some(Banner::error(format!("Export failed: {err}")));
            }
        }
    }

    fn set_form_error(&mut self, text: &str) {
        if let Some(form) = self.state.donate.as_mut() {
            form.error = Some(text.to_string());
        }
    }
}

/// Inline messages for validation failures, worded as the donor sees them.
pub fn validation_message(err: &FundingError) -> String {
    match err {
        FundingError::NotAuthenticated => "Please log in as a donor before donating.".to_string(),
        FundingError::FullyFunded(_) => {
            "This campaign is already fully funded. Thank you for your interest!".to_string()
        }
        FundingError::InvalidAmount(_) => "Please enter a valid donation amount.".to_string(),
        FundingError::ExceedsRemaining { remaining } => format!(
            "Amount exceeds remaining goal ({remaining}). Please enter {remaining} or less."
        ),
        FundingError::KeyNotFound(_) => {
            "Campaign not found. Refresh the list and try again.".to_string()
        }
    }
}

/// Submission failures: the backend's own words where it gave any,
/// a generic retry prompt where it did not respond at all.
pub fn submit_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Rejected(message) | ClientError::Server(message) if !message.is_empty() => {
            message.clone()
        }
        ClientError::NotFound => "Donation failed. Please try again.".to_string(),
        _ => "Error processing donation. Please try again.".to_string(),
    }
}

fn client_error_text(err: &ClientError) -> String {
    match err {
        ClientError::NotFound => "not found".to_string(),
        ClientError::Rejected(message) | ClientError::Server(message) => message.clone(),
        ClientError::Transport(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_quote_the_remaining_amount() {
        let message = validation_message(&FundingError::ExceedsRemaining {
            remaining: Money::new(600_00),
        });
        assert_eq!(
            message,
            "Amount exceeds remaining goal (₹600.00). Please enter ₹600.00 or less."
        );
    }

    #[test]
    fn submit_errors_prefer_the_backend_message() {
        assert_eq!(
            submit_error_message(&ClientError::Rejected("Campaign not found".to_string())),
            "Campaign not found"
        );
        assert_eq!(
            submit_error_message(&ClientError::Rejected(String::new())),
            "Error processing donation. Please try again."
        );
    }

    #[test]
    fn browse_state_cycles_categories_and_clamps_selection() {
        let mut browse = BrowseState::default();
        assert_eq!(browse.category_label(), "All");
        for _ in 0..CATEGORY_FILTERS.len() {
            browse.cycle_category();
        }
        assert_eq!(browse.category_label(), "All");

        browse.selected = 5;
        browse.refresh_visible(&CampaignCache::new());
        assert_eq!(browse.selected, 0);
        assert!(browse.visible.is_empty());
    }
}

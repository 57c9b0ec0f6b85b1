pub struct ScraperSettings {
    pub base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub requests_per_sec: u32,
    pub worker_count: usize,
    pub game: &'static str,
    pub format: &'static str,
    pub window: &'static str,
    pub page_size: usize,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://play.limitlesstcg.com",
            user_agent: "CardMetaReport/1.0",
            timeout_secs: 18,
            requests_per_sec: 360,
            worker_count: 12,
            game: "PTCG",
            format: "STANDARD",
            window: "4weeks",
            page_size: 100,
        }
    }
}

pub struct ReportSettings {
    pub min_win_rate: f64,
    pub output_file: &'static str,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            min_win_rate: 0.40,
            output_file: "card_meta_report.html",
        }
    }
}

pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub report: ReportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

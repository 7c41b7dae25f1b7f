use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use pinkfit_core::{
    is_numeric_input, today, HistoryPeriod, HistoryReport, HistoryUseCase, Metric, RecordRepository,
    RecordService, SaveOutcome,
};
use tracing::warn;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Input,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Weight,
    BodyFat,
}

pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

pub struct App<R: RecordRepository> {
    pub service: RecordService<R>,
    pub tab: Tab,
    pub today: NaiveDate,

    // Input tab
    pub weight: String,
    pub body_fat: String,
    pub focus: Field,
    pub is_update: bool,

    // History tab
    pub period: HistoryPeriod,
    pub metric: Metric,
    pub report: HistoryReport,

    pub toast: Option<Toast>,
    pub should_quit: bool,
}

impl<R: RecordRepository> App<R> {
    pub fn new(service: RecordService<R>) -> App<R> {
        let today = today();
        let period = HistoryPeriod::default();
        let metric = Metric::default();

        let mut app = App {
            service,
            tab: Tab::Input,
            today,
            weight: String::new(),
            body_fat: String::new(),
            focus: Field::Weight,
            is_update: false,
            period,
            metric,
            report: HistoryReport::empty(period, metric),
            toast: None,
            should_quit: false,
        };
        app.load_today();
        app
    }

    /// Prefills the input fields from today's stored record, if any.
    fn load_today(&mut self) {
        match self.service.get_record(self.today) {
            Ok(Some(existing)) => {
                self.weight = existing.weight;
                self.body_fat = existing.body_fat;
                self.is_update = true;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Could not load today's record"),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn switch_tab(&mut self) {
        match self.tab {
            Tab::Input => self.go_to_history(),
            Tab::History => self.go_to_input(),
        }
    }

    pub fn go_to_input(&mut self) {
        self.tab = Tab::Input;
    }

    pub fn go_to_history(&mut self) {
        self.tab = Tab::History;
        self.refresh_report();
    }

    // --- Input tab ---

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Weight => &mut self.weight,
            Field::BodyFat => &mut self.body_fat,
        }
    }

    pub fn focused_value(&self) -> &str {
        match self.focus {
            Field::Weight => &self.weight,
            Field::BodyFat => &self.body_fat,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Weight => Field::BodyFat,
            Field::BodyFat => Field::Weight,
        };
    }

    /// Appends `c` only if the field stays a valid decimal.
    pub fn input_char(&mut self, c: char) {
        let field = self.focused_mut();
        let mut candidate = field.clone();
        candidate.push(c);
        if is_numeric_input(&candidate) {
            *field = candidate;
        }
    }

    pub fn delete_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn save(&mut self) {
        match self.service.save(self.today, &self.weight, &self.body_fat) {
            Ok(SaveOutcome::Skipped) => {}
            Ok(outcome) => {
                self.show_toast(outcome.message());
                self.is_update = true;
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.show_toast(format!("Could not save: {}", e));
            }
        }
    }

    // --- History tab ---

    pub fn next_period(&mut self) {
        self.period = self.period.next();
        self.refresh_report();
    }

    pub fn previous_period(&mut self) {
        self.period = self.period.previous();
        self.refresh_report();
    }

    pub fn toggle_metric(&mut self) {
        self.metric = self.metric.toggle();
        self.refresh_report();
    }

    pub fn refresh_report(&mut self) {
        let usecase = HistoryUseCase::new(self.service.repository());
        let now = Local::now().naive_local();
        self.report = match usecase.report(self.period, self.metric, now) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Could not load history");
                HistoryReport::empty(self.period, self.metric)
            }
        };
    }

    // --- Toast ---

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn tick(&mut self) {
        self.expire_toast(Instant::now());
    }

    fn expire_toast(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now.duration_since(toast.shown_at) >= TOAST_DURATION {
                self.toast = None;
            }
        }
    }
}

//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use inquest_core::{
  barrier::Barrier,
  causal::CausalFactor,
  evidence::Evidence,
  interview::Interview,
  investigation::Investigation,
  recommendation::Recommendation,
  timeline::TimelineEvent,
};
use uuid::Uuid;

use crate::{
  autosave::{DEFAULT_QUIESCENCE, Debouncer},
  client::ApiClient,
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the investigation list; right pane is empty or a preview.
  InvestigationList,
  /// Focus on the investigation detail pane.
  InvestigationDetail,
  /// Full-screen plain-text report.
  ReportView,
}

// ─── Detail data ──────────────────────────────────────────────────────────────

/// Everything shown on the detail pane. Each collection is fetched
/// independently; a failed read leaves that collection empty.
pub struct DetailData {
  pub investigation:   Investigation,
  pub evidence:        Vec<Evidence>,
  pub interviews:      Vec<Interview>,
  pub timeline:        Vec<TimelineEvent>,
  pub causal_factors:  Vec<CausalFactor>,
  pub recommendations: Vec<Recommendation>,
  pub barriers:        Vec<Barrier>,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// All investigations returned by the API on startup.
  pub investigations: Vec<Investigation>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* investigation list.
  pub list_cursor: usize,

  /// Data for the currently-open investigation, if any.
  pub detail: Option<DetailData>,

  /// Whether the description editor is active on the detail pane.
  pub editing_notes: bool,

  /// Editor buffer; flushed to the server by the debounced autosave.
  pub draft_notes: String,

  /// Rendered report lines for the report screen.
  pub report_lines: Vec<String>,

  /// Scroll offset within the report.
  pub report_scroll: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,

  autosave: Debouncer,
}

impl App {
  /// Create an [`App`] with an empty investigation list.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::InvestigationList,
      investigations: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail: None,
      editing_notes: false,
      draft_notes: String::new(),
      report_lines: Vec::new(),
      report_scroll: 0,
      status_msg: String::new(),
      client: Arc::new(client),
      autosave: Debouncer::new(DEFAULT_QUIESCENCE),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch all investigations from the API.
  pub async fn load_investigations(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading investigations…".into();
    match self.client.list_investigations().await {
      Ok(investigations) => {
        self.investigations = investigations;
        self.list_cursor = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Load all collections for `id` into the detail pane. Each read fails
  /// independently; the pane shows whatever was retrieved.
  async fn load_detail(&mut self, id: Uuid) {
    let Some(investigation) = self
      .investigations
      .iter()
      .find(|i| i.investigation_id == id)
      .cloned()
    else {
      self.status_msg = "Investigation no longer listed".into();
      return;
    };

    self.status_msg = "Loading…".into();
    let mut failures = 0usize;

    macro_rules! fetch {
      ($call:expr) => {
        match $call.await {
          Ok(records) => records,
          Err(_) => {
            failures += 1;
            Vec::new()
          }
        }
      };
    }

    let detail = DetailData {
      evidence:        fetch!(self.client.evidence_for(id)),
      interviews:      fetch!(self.client.interviews_for(id)),
      timeline:        fetch!(self.client.timeline_for(id)),
      causal_factors:  fetch!(self.client.causal_factors_for(id)),
      recommendations: fetch!(self.client.recommendations_for(id)),
      barriers:        fetch!(self.client.barriers_for(id)),
      investigation,
    };

    self.status_msg = if failures > 0 {
      format!("{failures} collection(s) failed to load")
    } else {
      String::new()
    };
    self.detail = Some(detail);
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Investigations that match the current filter query.
  pub fn filtered_investigations(&self) -> Vec<&Investigation> {
    if self.filter.is_empty() {
      return self.investigations.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .investigations
      .iter()
      .filter(|inv| {
        matcher.fuzzy_match(&inv.number, &self.filter).is_some()
          || matcher.fuzzy_match(&inv.location, &self.filter).is_some()
      })
      .collect()
  }

  /// The investigation under the list cursor in the filtered view, if any.
  pub fn cursor_investigation(&self) -> Option<&Investigation> {
    let list = self.filtered_investigations();
    list.get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.editing_notes {
      self.handle_edit_key(key);
      return Ok(true);
    }

    if self.filter_active {
      return self.handle_filter_key(key).await;
    }

    match self.screen {
      Screen::InvestigationList => self.handle_list_key(key).await,
      Screen::InvestigationDetail => self.handle_detail_key(key).await,
      Screen::ReportView => Ok(self.handle_report_key(key)),
    }
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Immediately open detail if there's exactly one match.
        let only = {
          let list = self.filtered_investigations();
          if list.len() == 1 {
            Some(list[0].investigation_id)
          } else {
            None
          }
        };
        if let Some(id) = only {
          self.open_detail(id).await;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_investigations().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
        }
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_investigation().map(|i| i.investigation_id) {
          self.open_detail(id).await;
        }
      }

      // Report straight from the list
      KeyCode::Char('r') => {
        if let Some(id) = self.cursor_investigation().map(|i| i.investigation_id) {
          self.open_report(id).await;
        }
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      // Refresh
      KeyCode::Char('R') => {
        let _ = self.load_investigations().await;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Back to list. A pending autosave is discarded, not flushed.
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.autosave.cancel();
        self.screen = Screen::InvestigationList;
        self.detail = None;
      }

      // Report for the open investigation
      KeyCode::Char('r') => {
        if let Some(id) = self.detail.as_ref().map(|d| d.investigation.investigation_id) {
          self.open_report(id).await;
        }
      }

      // Edit the description with debounced autosave
      KeyCode::Char('e') => {
        if let Some(detail) = &self.detail {
          self.draft_notes = detail.investigation.description.clone();
          self.editing_notes = true;
        }
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_report_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.report_lines.clear();
        self.report_scroll = 0;
        self.screen = if self.detail.is_some() {
          Screen::InvestigationDetail
        } else {
          Screen::InvestigationList
        };
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.report_scroll + 1 < self.report_lines.len() {
          self.report_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.report_scroll = self.report_scroll.saturating_sub(1);
      }
      KeyCode::PageDown => {
        self.report_scroll =
          (self.report_scroll + 20).min(self.report_lines.len().saturating_sub(1));
      }
      KeyCode::PageUp => {
        self.report_scroll = self.report_scroll.saturating_sub(20);
      }
      _ => {}
    }
    true
  }

  fn handle_edit_key(&mut self, key: KeyEvent) {
    match key.code {
      // Leaving the editor discards the pending save (source behaviour).
      KeyCode::Esc => {
        self.autosave.cancel();
        self.editing_notes = false;
        self.status_msg = String::new();
      }
      KeyCode::Backspace => {
        self.draft_notes.pop();
        self.schedule_autosave();
      }
      KeyCode::Enter => {
        self.draft_notes.push('\n');
        self.schedule_autosave();
      }
      KeyCode::Char(c) => {
        self.draft_notes.push(c);
        self.schedule_autosave();
      }
      _ => {}
    }
  }

  /// Reset the pending-save timer; only the most recent edit's timer fires.
  fn schedule_autosave(&mut self) {
    let Some(id) = self.detail.as_ref().map(|d| d.investigation.investigation_id)
    else {
      return;
    };

    // Keep the in-memory copy current so leaving and re-entering the editor
    // shows the latest draft.
    if let Some(detail) = &mut self.detail {
      detail.investigation.description = self.draft_notes.clone();
    }

    let client = self.client.clone();
    let draft = self.draft_notes.clone();
    self.status_msg = "Unsaved changes…".into();
    self.autosave.schedule(move || async move {
      // A failed background save is not retried; the next edit reschedules.
      let _ = client.save_description(id, draft).await;
    });
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Transition to `InvestigationDetail` for `id`, loading collections.
  async fn open_detail(&mut self, id: Uuid) {
    self.load_detail(id).await;
    if self.detail.is_some() {
      self.screen = Screen::InvestigationDetail;
    }
  }

  /// Fetch and show the plain-text report for `id`.
  async fn open_report(&mut self, id: Uuid) {
    self.status_msg = "Rendering report…".into();
    match self.client.report_text(id).await {
      Ok(text) => {
        self.report_lines = text.lines().map(str::to_owned).collect();
        self.report_scroll = 0;
        self.screen = Screen::ReportView;
        self.status_msg = String::new();
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
      }
    }
  }
}

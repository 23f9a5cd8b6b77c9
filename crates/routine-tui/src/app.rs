use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use routine_core::{
    visible_products, CatalogLoader, CategoryChoice, ChatClient, ChatError, Config, Conversation,
    ConversationError, FilterCriteria, KeyValueStore, PendingRequest, Product, ProductId,
    RequestTicket, SelectionSet, Visibility,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::tui::{AppEvent, EventSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Category,
    Keyword,
    Products,
    Tray,
    Chat,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Category => FocusPane::Keyword,
            FocusPane::Keyword => FocusPane::Products,
            FocusPane::Products => FocusPane::Tray,
            FocusPane::Tray => FocusPane::Chat,
            FocusPane::Chat => FocusPane::Category,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusPane::Category => FocusPane::Chat,
            FocusPane::Keyword => FocusPane::Category,
            FocusPane::Products => FocusPane::Keyword,
            FocusPane::Tray => FocusPane::Products,
            FocusPane::Chat => FocusPane::Tray,
        }
    }

    /// Panes holding a text input start editing when focused
    pub fn is_text_input(self) -> bool {
        matches!(self, FocusPane::Keyword | FocusPane::Chat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub focus: FocusPane,
    pub input_mode: InputMode,
    pub status: Option<StatusMessage>,

    // Filter state
    pub criteria: FilterCriteria,
    pub keyword_cursor: usize,
    pub visibility: Visibility,
    pub product_state: ListState,
    pub hovered_product: Option<usize>,

    // Selection state
    pub selection: SelectionSet,
    pub tray_products: Vec<Product>,
    pub tray_state: ListState,

    // Chat state
    pub conversation: Conversation,
    pub chat_input: String,
    pub chat_cursor: usize,
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub chat_task: Option<JoinHandle<()>>,
    pub animation_frame: u8,

    // Panel areas for mouse hit-testing (updated during render)
    pub products_area: Option<Rect>,
    pub tray_area: Option<Rect>,
    pub chat_area: Option<Rect>,
    pub input_area: Option<Rect>,

    // Collaborators
    catalog: CatalogLoader,
    chat_client: ChatClient,
    store: Box<dyn KeyValueStore>,
    thinking_delay: Duration,
    events: Option<EventSender>,
}

impl App {
    pub fn new(config: &Config, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let catalog =
            CatalogLoader::with_timeout(config.catalog_source(), config.request_timeout())?;
        let chat_client = ChatClient::with_timeout(&config.chat_endpoint, config.request_timeout())?
            .max_tokens(config.max_tokens);
        let selection = SelectionSet::restore(store.as_ref());
        info!(
            catalog = %catalog.source(),
            endpoint = %chat_client.endpoint(),
            selected = selection.len(),
            "starting routine advisor"
        );

        Ok(Self {
            should_quit: false,
            focus: FocusPane::Category,
            input_mode: InputMode::Normal,
            status: None,

            criteria: FilterCriteria::default(),
            keyword_cursor: 0,
            visibility: Visibility::Placeholder,
            product_state: ListState::default(),
            hovered_product: None,

            selection,
            tray_products: Vec::new(),
            tray_state: ListState::default(),

            conversation: Conversation::new(),
            chat_input: String::new(),
            chat_cursor: 0,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            chat_task: None,
            animation_frame: 0,

            products_area: None,
            tray_area: None,
            chat_area: None,
            input_area: None,

            catalog,
            chat_client,
            store,
            thinking_delay: config.thinking_delay(),
            events: None,
        })
    }

    /// Chat replies are delivered through the main event channel
    pub fn set_event_sender(&mut self, tx: EventSender) {
        self.events = Some(tx);
    }

    pub fn set_focus(&mut self, focus: FocusPane) {
        self.focus = focus;
        self.input_mode = if focus.is_text_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
        if focus != FocusPane::Products {
            self.hovered_product = None;
        }
        if focus == FocusPane::Keyword {
            self.keyword_cursor = self.criteria.keyword.chars().count();
        } else if focus == FocusPane::Chat {
            self.chat_cursor = self.chat_input.chars().count();
        }
    }

    // Status line
    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    async fn load_catalog(&mut self) -> Option<Vec<Product>> {
        match self.catalog.load().await {
            Ok(products) => Some(products),
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                self.set_error(format!("Catalog unavailable: {}", e));
                None
            }
        }
    }

    /// Re-reads the catalog and recomputes both the grid and the tray
    pub async fn refresh_all(&mut self) {
        self.refresh_products().await;
        self.refresh_tray().await;
    }

    /// Re-reads the catalog and applies the current filter criteria
    pub async fn refresh_products(&mut self) {
        let Some(products) = self.load_catalog().await else {
            return;
        };
        self.visibility = visible_products(&products, &self.criteria);
        self.hovered_product = None;

        let len = self.visibility.products().len();
        if len == 0 {
            self.product_state.select(None);
        } else {
            let i = self.product_state.selected().unwrap_or(0);
            self.product_state.select(Some(i.min(len - 1)));
        }
        debug!(criteria = ?self.criteria, visible = len, "filter applied");
    }

    /// Re-reads the catalog and rebuilds the tray. Ids missing from the catalog are skipped.
    pub async fn refresh_tray(&mut self) {
        let Some(products) = self.load_catalog().await else {
            return;
        };
        self.tray_products = self.selection.resolve(&products).into_iter().cloned().collect();

        let len = self.tray_products.len();
        if len == 0 {
            self.tray_state.select(None);
        } else if let Some(i) = self.tray_state.selected() {
            self.tray_state.select(Some(i.min(len - 1)));
        }
    }

    // Filter actions
    pub async fn next_category(&mut self) {
        self.criteria.category = self.criteria.category.next();
        self.refresh_products().await;
    }

    pub async fn prev_category(&mut self) {
        self.criteria.category = self.criteria.category.prev();
        self.refresh_products().await;
    }

    pub async fn set_category(&mut self, category: CategoryChoice) {
        self.criteria.category = category;
        self.refresh_products().await;
    }

    // Selection actions
    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selection.contains(id)
    }

    pub async fn toggle_product(&mut self, id: ProductId) {
        let now_selected = self.selection.toggle(id);
        info!(id, now_selected, "selection toggled");
        if let Err(e) = self.selection.persist(self.store.as_mut()) {
            error!(error = %e, "failed to persist selection");
            self.set_error(format!("Could not save selection: {}", e));
        }
        self.refresh_tray().await;
    }

    pub async fn toggle_highlighted_product(&mut self) {
        if let Some(i) = self.product_state.selected() {
            self.toggle_product_at(i).await;
        }
    }

    pub async fn toggle_product_at(&mut self, index: usize) {
        let Some(id) = self.visibility.products().get(index).map(|p| p.id) else {
            return;
        };
        self.product_state.select(Some(index));
        self.toggle_product(id).await;
    }

    pub async fn remove_tray_item_at(&mut self, index: usize) {
        let Some(id) = self.tray_products.get(index).map(|p| p.id) else {
            return;
        };
        self.toggle_product(id).await;
    }

    pub async fn remove_selected_tray_item(&mut self) {
        if let Some(i) = self.tray_state.selected() {
            self.remove_tray_item_at(i).await;
        }
    }

    /// Drops stored ids that no longer exist in the catalog
    pub async fn prune_orphans(&mut self) {
        let Some(products) = self.load_catalog().await else {
            return;
        };
        let removed = self.selection.prune_orphans(&products);
        if removed.is_empty() {
            self.set_info("Every selected product is still in the catalog");
            return;
        }

        warn!(?removed, "pruned selections missing from catalog");
        if let Err(e) = self.selection.persist(self.store.as_mut()) {
            error!(error = %e, "failed to persist selection");
            self.set_error(format!("Could not save selection: {}", e));
            return;
        }
        self.set_info(format!("Removed {} unavailable product(s)", removed.len()));
        self.refresh_tray().await;
    }

    // Product grid navigation
    pub fn product_nav_down(&mut self) {
        let len = self.visibility.products().len();
        if len > 0 {
            let i = self.product_state.selected().unwrap_or(0);
            self.product_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn product_nav_up(&mut self) {
        let i = self.product_state.selected().unwrap_or(0);
        self.product_state.select(Some(i.saturating_sub(1)));
    }

    pub fn product_nav_first(&mut self) {
        if !self.visibility.products().is_empty() {
            self.product_state.select(Some(0));
        }
    }

    pub fn product_nav_last(&mut self) {
        let len = self.visibility.products().len();
        if len > 0 {
            self.product_state.select(Some(len - 1));
        }
    }

    pub fn tray_nav_down(&mut self) {
        let len = self.tray_products.len();
        if len > 0 {
            let i = self.tray_state.selected().map(|i| i + 1).unwrap_or(0);
            self.tray_state.select(Some(i.min(len - 1)));
        }
    }

    pub fn tray_nav_up(&mut self) {
        let i = self.tray_state.selected().unwrap_or(0);
        self.tray_state.select(Some(i.saturating_sub(1)));
    }

    /// Description shown in the caption bar: the hovered card, else the focused one
    pub fn caption(&self) -> Option<&str> {
        let index = self.hovered_product.or_else(|| {
            if self.focus == FocusPane::Products {
                self.product_state.selected()
            } else {
                None
            }
        })?;
        self.visibility
            .products()
            .get(index)
            .map(|p| p.description.as_str())
    }

    /// Row of the product grid under a screen position
    pub fn product_index_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.products_area?;
        let index = list_row_at(area, x, y)? + self.product_state.offset();
        (index < self.visibility.products().len()).then_some(index)
    }

    pub fn tray_index_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.tray_area?;
        let index = list_row_at(area, x, y)? + self.tray_state.offset();
        (index < self.tray_products.len()).then_some(index)
    }

    // Conversation
    pub fn submit_chat(&mut self) {
        match self.conversation.submit_text(&self.chat_input) {
            Ok(pending) => self.spawn_request(pending),
            Err(ConversationError::Busy) => self.set_info("Waiting for the advisor to reply..."),
            Err(ConversationError::EmptyInput) => {}
        }
    }

    /// Sends the selected products to the advisor and asks for a routine
    pub async fn generate_routine(&mut self) {
        if self.conversation.is_awaiting() {
            self.set_info("Waiting for the advisor to reply...");
            return;
        }

        let Some(products) = self.load_catalog().await else {
            return;
        };
        let products_json = match self.selection.products_json(&products) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to encode selected products");
                self.set_error(format!("Could not encode selection: {}", e));
                return;
            }
        };
        debug!(products = %products_json, "routine context");

        match self.conversation.submit_routine(&products_json) {
            Ok(pending) => self.spawn_request(pending),
            Err(e) => self.set_info(e.to_string()),
        }
    }

    fn spawn_request(&mut self, pending: PendingRequest) {
        let Some(tx) = self.events.clone() else {
            warn!(ticket = pending.ticket.id(), "no event channel for chat reply");
            self.conversation.fail(pending.ticket);
            return;
        };

        let client = self.chat_client.clone();
        let ticket = pending.ticket;
        self.chat_task = Some(tokio::spawn(async move {
            let result = client.send(&pending.messages).await;
            let _ = tx.send(AppEvent::ChatReply { ticket, result });
        }));
        self.animation_frame = 0;
        self.scroll_chat_to_bottom();
    }

    pub fn handle_chat_reply(&mut self, ticket: RequestTicket, result: Result<String, ChatError>) {
        match result {
            Ok(reply) => {
                if self.conversation.complete(ticket, reply) {
                    self.chat_task = None;
                    self.chat_input.clear();
                    self.chat_cursor = 0;
                    self.scroll_chat_to_bottom();
                }
            }
            Err(e) => {
                if self.conversation.fail(ticket) {
                    self.chat_task = None;
                    error!(ticket = ticket.id(), error = %e, "chat request failed");
                    self.set_error(format!("Advisor request failed: {}", e));
                } else {
                    debug!(ticket = ticket.id(), "ignoring failure of stale request");
                }
            }
        }
    }

    /// Invalidates the in-flight request and aborts its task
    pub fn cancel_chat(&mut self) {
        if self.conversation.cancel().is_some() {
            if let Some(task) = self.chat_task.take() {
                task.abort();
            }
            self.set_info("Request cancelled");
        }
    }

    pub fn thinking_visible(&self) -> bool {
        self.conversation
            .thinking_visible(Instant::now(), self.thinking_delay)
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.conversation.is_awaiting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Scroll chat so the newest message (or the thinking line) is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;
        for msg in self.conversation.visible_messages() {
            total_lines = total_lines.saturating_add(1); // speaker line
            for line in msg.display_text().lines() {
                let char_count = line.chars().count();
                total_lines = total_lines.saturating_add((char_count / wrap_width + 1) as u16);
            }
            total_lines = total_lines.saturating_add(1); // blank separator
        }
        if self.conversation.is_awaiting() {
            total_lines = total_lines.saturating_add(2);
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };
        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }
}

/// Row index inside a bordered list area
fn list_row_at(area: Rect, x: u16, y: u16) -> Option<usize> {
    let inside_x = x > area.x && x < area.x + area.width.saturating_sub(1);
    let inside_y = y > area.y && y < area.y + area.height.saturating_sub(1);
    (inside_x && inside_y).then(|| (y - area.y - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use routine_core::{Category, ChatRole, FileStore, MemoryStore};
    use std::path::Path;
    use tokio::sync::mpsc;

    const CATALOG: &str = r#"{
        "products": [
            {"id": 1, "name": "Foaming Facial Cleanser", "brand": "CeraVe", "category": "cleanser",
             "description": "Gel cleanser for oily skin.", "image": "1.jpg"},
            {"id": 2, "name": "Revitalift Night Cream", "brand": "L'Oréal Paris", "category": "moisturizer",
             "description": "Overnight moisturizer.", "image": "2.jpg"},
            {"id": 3, "name": "Anthelios Melt-in Milk SPF 60", "brand": "La Roche-Posay", "category": "suncare",
             "description": "Broad spectrum sunscreen.", "image": "3.jpg"}
        ]
    }"#;

    /// Endpoint on a port nothing listens on
    fn closed_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/", addr)
    }

    fn config_for(dir: &Path) -> Config {
        let catalog = dir.join("products.json");
        std::fs::write(&catalog, CATALOG).unwrap();
        Config {
            catalog: catalog.to_string_lossy().into_owned(),
            chat_endpoint: closed_endpoint(),
            request_timeout_secs: 5,
            storage_path: Some(dir.join("storage.json")),
            ..Config::default()
        }
    }

    fn visible_ids(app: &App) -> Vec<ProductId> {
        app.visibility.products().iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_starts_with_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_for(dir.path()), Box::new(MemoryStore::new())).unwrap();
        app.refresh_all().await;
        assert!(app.visibility.is_placeholder());
        assert!(app.tray_products.is_empty());
        assert!(app.status.is_none());
    }

    #[tokio::test]
    async fn test_category_and_keyword_drive_the_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_for(dir.path()), Box::new(MemoryStore::new())).unwrap();

        app.next_category().await;
        assert_eq!(app.criteria.category, CategoryChoice::All);
        assert_eq!(visible_ids(&app), vec![1, 2, 3]);

        app.set_category(CategoryChoice::Only(Category::Suncare)).await;
        assert_eq!(visible_ids(&app), vec![3]);

        app.set_category(CategoryChoice::Unset).await;
        app.criteria.keyword = "oréal".to_string();
        app.refresh_products().await;
        assert_eq!(visible_ids(&app), vec![2]);
    }

    #[tokio::test]
    async fn test_toggle_persists_and_updates_tray() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let store = FileStore::open(config.storage_path()).unwrap();
        let mut app = App::new(&config, Box::new(store)).unwrap();

        app.set_category(CategoryChoice::All).await;
        app.toggle_product_at(2).await;
        app.toggle_product_at(0).await;
        assert!(app.is_selected(3));
        let tray: Vec<ProductId> = app.tray_products.iter().map(|p| p.id).collect();
        assert_eq!(tray, vec![3, 1]);

        let reopened = FileStore::open(config.storage_path()).unwrap();
        let reloaded = App::new(&config, Box::new(reopened)).unwrap();
        assert_eq!(reloaded.selection.ids(), &[3, 1]);

        app.remove_tray_item_at(0).await;
        assert_eq!(app.selection.ids(), &[1]);
        assert_eq!(app.tray_products.len(), 1);
    }

    #[tokio::test]
    async fn test_orphaned_ids_are_hidden_until_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let mut store = MemoryStore::new();
        SelectionSet::from_ids([2, 40]).persist(&mut store).unwrap();

        let mut app = App::new(&config, Box::new(store)).unwrap();
        app.refresh_tray().await;
        assert_eq!(app.tray_products.len(), 1);
        assert_eq!(app.selection.len(), 2);

        app.prune_orphans().await;
        assert_eq!(app.selection.ids(), &[2]);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[tokio::test]
    async fn test_caption_follows_hover_then_focus() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_for(dir.path()), Box::new(MemoryStore::new())).unwrap();
        app.set_category(CategoryChoice::All).await;

        assert_eq!(app.caption(), None);
        app.set_focus(FocusPane::Products);
        assert_eq!(app.caption(), Some("Gel cleanser for oily skin."));
        app.hovered_product = Some(2);
        assert_eq!(app.caption(), Some("Broad spectrum sunscreen."));
        app.set_focus(FocusPane::Chat);
        assert_eq!(app.caption(), None);
    }

    #[tokio::test]
    async fn test_failed_request_adds_no_assistant_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_for(dir.path()), Box::new(MemoryStore::new())).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.set_event_sender(tx);

        app.chat_input = "hello".to_string();
        app.submit_chat();
        assert!(app.conversation.is_awaiting());

        app.submit_chat();
        assert_eq!(app.conversation.messages().len(), 3);

        match rx.recv().await {
            Some(AppEvent::ChatReply { ticket, result }) => {
                assert!(result.is_err());
                app.handle_chat_reply(ticket, result);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        assert!(!app.conversation.is_awaiting());
        assert_eq!(app.conversation.messages().last().unwrap().role, ChatRole::User);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
        assert_eq!(app.chat_input, "hello");
    }

    #[tokio::test]
    async fn test_reply_after_cancel_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_for(dir.path()), Box::new(MemoryStore::new())).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.set_event_sender(tx);

        app.generate_routine().await;
        let ticket = app.conversation.current_ticket().unwrap();
        app.cancel_chat();
        assert!(app.chat_task.is_none());

        app.handle_chat_reply(ticket, Ok("too late".to_string()));
        assert_eq!(app.conversation.messages().last().unwrap().role, ChatRole::User);
        assert_eq!(
            app.conversation.messages().last().unwrap().display_text(),
            routine_core::conversation::ROUTINE_REQUEST
        );
    }

    #[tokio::test]
    async fn test_reply_completes_and_clears_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_for(dir.path()), Box::new(MemoryStore::new())).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.set_event_sender(tx);

        app.chat_input = "Suggest a night routine".to_string();
        app.submit_chat();
        let ticket = app.conversation.current_ticket().unwrap();
        app.handle_chat_reply(ticket, Ok("Cleanse, then moisturize.".to_string()));

        assert!(app.chat_input.is_empty());
        let last = app.conversation.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, "Cleanse, then moisturize.");
    }

    #[tokio::test]
    async fn test_unresponsive_catalog_url_times_out() {
        // Accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            catalog: format!("http://{}/products.json", addr),
            request_timeout_secs: 1,
            ..config_for(dir.path())
        };
        let mut app = App::new(&config, Box::new(MemoryStore::new())).unwrap();
        app.criteria.category = CategoryChoice::All;

        tokio::time::timeout(Duration::from_secs(4), app.refresh_products())
            .await
            .expect("catalog fetch still pending after 4s");
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
        assert!(app.visibility.products().is_empty());

        server.abort();
    }

    #[test]
    fn test_list_row_at_skips_borders() {
        let area = Rect::new(0, 2, 20, 6);
        assert_eq!(list_row_at(area, 5, 2), None);
        assert_eq!(list_row_at(area, 5, 3), Some(0));
        assert_eq!(list_row_at(area, 5, 6), Some(3));
        assert_eq!(list_row_at(area, 5, 7), None);
        assert_eq!(list_row_at(area, 0, 4), None);
    }
}

use iced::widget::{container, image, scrollable, text, Column, Row, Space};
use iced::{task, window};
use iced::{ContentFit, Element, Length, Size, Subscription, Task, Theme};
use iced_aw::Spinner;
use std::collections::{HashMap, HashSet};

// Declare the application modules
mod net;
mod state;
mod ui;

use state::screen::{Effect, Event, Screen};
use ui::grid;

/// Main application state
struct PhotoGrid {
    /// Screen state machine deciding what is rendered
    screen: Screen,
    /// Decoded thumbnails keyed by image id
    thumbs: HashMap<String, image::Handle>,
    /// Ids with a thumbnail request outstanding
    pending: HashSet<String>,
    /// Scroll position of the grid, in logical pixels from the top
    scroll_top: f32,
    /// Height of the visible grid area
    viewport_height: f32,
    /// Abort handle for the in-flight list request
    fetch: Option<task::Handle>,
}

/// Application messages (events)
#[derive(Debug)]
enum Message {
    /// The list request settled
    ListFetched(Result<Vec<state::data::ImageItem>, net::client::FetchError>),
    /// A thumbnail request settled
    ThumbFetched(String, Result<net::thumbs::Thumbnail, net::client::FetchError>),
    /// The window was measured or resized
    Measured(Size),
    /// The grid was scrolled
    Scrolled(scrollable::Viewport),
}

impl PhotoGrid {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Mounting the screen fires the one list request.
        let (screen, effect) = Screen::default().apply(Event::Mounted);

        let mut app = PhotoGrid {
            screen,
            thumbs: HashMap::new(),
            pending: HashSet::new(),
            scroll_top: 0.0,
            viewport_height: 0.0,
            fetch: None,
        };

        let fetch = app.run_effect(effect);

        // First layout pass: ask the window for its current size. Later
        // passes arrive through the resize subscription.
        let measure = window::get_latest()
            .and_then(window::get_size)
            .map(Message::Measured);

        (app, Task::batch([fetch, measure]))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ListFetched(result) => {
                self.fetch = None;

                let task = match result {
                    Ok(list) => {
                        println!("✅ Fetched list of {} images", list.len());
                        self.dispatch(Event::FetchSucceeded(list))
                    }
                    Err(err) => {
                        // The screen only keeps the fact that it failed; the
                        // concrete cause goes to the process log.
                        eprintln!("❌ Failed to fetch image list: {}", err);
                        self.dispatch(Event::FetchFailed)
                    }
                };

                Task::batch([task, self.request_visible_thumbs()])
            }
            Message::Measured(size) => {
                self.viewport_height = size.height;
                let task = self.dispatch(Event::LayoutMeasured(size.width));
                Task::batch([task, self.request_visible_thumbs()])
            }
            Message::Scrolled(viewport) => {
                self.scroll_top = viewport.absolute_offset().y;
                self.viewport_height = viewport.bounds().height;
                self.request_visible_thumbs()
            }
            Message::ThumbFetched(id, result) => {
                self.pending.remove(&id);

                match result {
                    Ok(thumb) => {
                        let handle =
                            image::Handle::from_rgba(thumb.width, thumb.height, thumb.rgba);
                        self.thumbs.insert(id, handle);
                    }
                    Err(err) => {
                        // The tile keeps its placeholder; the grid itself is
                        // unaffected by a single image failing.
                        eprintln!("⚠️  Thumbnail {} failed: {}", id, err);
                    }
                }

                Task::none()
            }
        }
    }

    /// Feed one event through the screen reducer and run its effect
    fn dispatch(&mut self, event: Event) -> Task<Message> {
        let (screen, effect) = std::mem::take(&mut self.screen).apply(event);
        self.screen = screen;
        self.run_effect(effect)
    }

    /// Execute an effect requested by the reducer
    fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::StartFetch => {
                // A superseding fetch cancels anything still in flight, so a
                // stale settlement can never race the new request.
                if let Some(handle) = self.fetch.take() {
                    handle.abort();
                }

                println!("🌐 Fetching image list from {}", net::client::list_url());

                let (task, handle) =
                    Task::perform(net::client::fetch_image_list(), Message::ListFetched)
                        .abortable();
                self.fetch = Some(handle);
                task
            }
        }
    }

    /// Request thumbnails for every visible tile that has none yet
    ///
    /// Called whenever the visible window can have changed: list arrival,
    /// resize, scroll. Already-decoded and already-requested ids are skipped.
    fn request_visible_thumbs(&mut self) -> Task<Message> {
        let list = self.screen.list();
        let height = self.screen.item_height();
        let rows = grid::row_count(list.len());
        let visible = grid::visible_rows(height, self.scroll_top, self.viewport_height, rows);

        let lo = (visible.start * grid::COLUMNS).min(list.len());
        let hi = (visible.end * grid::COLUMNS).min(list.len());

        let wanted: Vec<String> = list[lo..hi]
            .iter()
            .map(|item| item.id.clone())
            .filter(|id| !self.thumbs.contains_key(id) && !self.pending.contains(id))
            .collect();

        let mut tasks = Vec::with_capacity(wanted.len());
        for id in wanted {
            self.pending.insert(id.clone());
            tasks.push(Task::perform(
                async move {
                    let result = net::thumbs::fetch_thumbnail(&id).await;
                    (id, result)
                },
                |(id, result)| Message::ThumbFetched(id, result),
            ));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content: Element<Message> = if self.screen.error() {
            text("Error fetching images").size(16).into()
        } else if self.screen.loading() {
            Spinner::new()
                .width(Length::Fixed(64.0))
                .height(Length::Fixed(64.0))
                .into()
        } else {
            self.grid()
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Build the scrollable image grid
    ///
    /// Only the rows intersecting the viewport are materialized; spacers
    /// stand in for the off-screen extent above and below, positioned with
    /// the constant-time item layout.
    fn grid(&self) -> Element<Message> {
        let list = self.screen.list();
        let height = self.screen.item_height();
        let rows = grid::row_count(list.len());
        let visible = grid::visible_rows(height, self.scroll_top, self.viewport_height, rows);

        let first_index = visible.start * grid::COLUMNS;
        let top_gap = grid::item_layout(height, first_index).offset;
        let bottom_gap = height * (rows - visible.end) as f32;

        let lo = first_index.min(list.len());
        let hi = (visible.end * grid::COLUMNS).min(list.len());

        let mut column = Column::new()
            .width(Length::Fill)
            .push(Space::with_height(Length::Fixed(top_gap)));

        // The last row may be short; it is rendered as-is, not padded.
        for row_items in list[lo..hi].chunks(grid::COLUMNS) {
            let mut row = Row::new().height(Length::Fixed(height));
            for item in row_items {
                row = row.push(self.tile(&item.id, height));
            }
            column = column.push(row);
        }

        column = column.push(Space::with_height(Length::Fixed(bottom_gap)));

        scrollable(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(Message::Scrolled)
            .into()
    }

    /// Build one square grid tile
    fn tile(&self, id: &str, side: f32) -> Element<Message> {
        let content: Element<Message> = match self.thumbs.get(id) {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
            None => Space::new(Length::Fill, Length::Fill).into(),
        };

        container(content)
            .width(Length::Fixed(side))
            .height(Length::Fixed(side))
            .padding(2)
            .style(tile_style)
            .into()
    }

    /// React to window resizes with a new layout pass
    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::Measured(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Flat background behind every tile, visible until its bytes arrive
fn tile_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Color::from_rgb8(0xee, 0xee, 0xee).into()),
        ..container::Style::default()
    }
}

fn main() -> iced::Result {
    iced::application(
        "Photo Grid",
        PhotoGrid::update,
        PhotoGrid::view,
    )
    .subscription(PhotoGrid::subscription)
    .theme(PhotoGrid::theme)
    .centered()
    .run_with(PhotoGrid::new)
}

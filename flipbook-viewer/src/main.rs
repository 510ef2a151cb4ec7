use flipbook_core::{
    Document, DocumentId, DocumentStore, DocumentSummary, FlipSurface, LoadSequencer, LoadTicket,
    Navigator, PageId, ViewerConfig,
};
use iced::{
    widget::{button, column, container, horizontal_space, image as img, row, scrollable, text},
    Alignment, ContentFit, Element, Length, Task, Theme,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod book;

use book::Book;

const DEFAULT_LOG_FILTER: &str = "flipbook_viewer=debug,flipbook_core=debug,info";
const UPLOAD_FAILED: &str = "Upload failed";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ViewerConfig::from_env()?;
    let store = DocumentStore::new(&config)?;
    tracing::info!(api_base = %store.base(), "starting viewer");

    iced::application("Document Viewer", Viewer::update, Viewer::view)
        .theme(|_| Theme::Dark)
        .run_with(move || Viewer::new(config, store))?;
    Ok(())
}

#[derive(Debug, Clone)]
enum Message {
    ToggleMenu,
    RefreshLibrary,
    LibraryLoaded(Result<Vec<DocumentSummary>, String>),
    SelectDocument(DocumentId),
    DocumentLoaded(LoadTicket, Result<Document, String>),
    PickUpload,
    UploadPicked(Option<PathBuf>),
    Uploaded(LoadTicket, Result<Document, String>),
    PageImageLoaded(DocumentId, PageId, Result<Vec<u8>, String>),
    NextPage,
    PrevPage,
    GoToPage(usize),
    FlipCompleted(DocumentId, usize),
}

struct Viewer {
    config: ViewerConfig,
    store: DocumentStore,
    documents: Vec<DocumentSummary>,
    current: Option<Document>,
    book: Option<Book>,
    navigator: Navigator,
    loads: LoadSequencer,
    show_menu: bool,
    is_uploading: bool,
    error: Option<String>,
}

impl Viewer {
    fn new(config: ViewerConfig, store: DocumentStore) -> (Self, Task<Message>) {
        (
            Self {
                config,
                store,
                documents: Vec::new(),
                current: None,
                book: None,
                navigator: Navigator::default(),
                loads: LoadSequencer::new(),
                show_menu: false,
                is_uploading: false,
                error: None,
            },
            Task::done(Message::RefreshLibrary),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleMenu => {
                self.show_menu = !self.show_menu;
            }
            Message::RefreshLibrary => {
                let store = self.store.clone();
                return Task::perform(
                    async move { store.list_documents().await.map_err(|e| e.to_string()) },
                    Message::LibraryLoaded,
                );
            }
            Message::LibraryLoaded(result) => match result {
                Ok(documents) => {
                    tracing::debug!(count = documents.len(), "library refreshed");
                    self.documents = documents;
                }
                Err(e) => {
                    tracing::error!("Error fetching documents: {}", e);
                }
            },
            Message::SelectDocument(id) => {
                let ticket = self.loads.begin();
                tracing::debug!(id, ticket = ticket.id(), "requesting document");
                let store = self.store.clone();
                return Task::perform(
                    async move { store.get_document(id).await.map_err(|e| e.to_string()) },
                    move |result| Message::DocumentLoaded(ticket, result),
                );
            }
            Message::DocumentLoaded(ticket, result) => match result {
                Ok(document) => {
                    if let Some(document) = self.loads.accept(ticket, document) {
                        self.show_menu = false;
                        return self.activate(document);
                    }
                }
                Err(e) => {
                    tracing::error!("Error loading document: {}", e);
                }
            },
            Message::PickUpload => {
                if self.is_uploading {
                    return Task::none();
                }
                return Task::perform(
                    rfd::AsyncFileDialog::new()
                        .add_filter("Documents", &["pdf", "docx"])
                        .pick_file(),
                    |handle| Message::UploadPicked(handle.map(|h| h.path().to_path_buf())),
                );
            }
            Message::UploadPicked(None) => {}
            Message::UploadPicked(Some(path)) => {
                self.is_uploading = true;
                self.error = None;
                let ticket = self.loads.begin();
                tracing::debug!(path = %path.display(), ticket = ticket.id(), "starting upload");
                let store = self.store.clone();
                return Task::perform(
                    async move { store.upload_path(&path).await.map_err(|e| e.to_string()) },
                    move |result| Message::Uploaded(ticket, result),
                );
            }
            Message::Uploaded(ticket, result) => {
                self.is_uploading = false;
                match result {
                    Ok(document) => {
                        let refresh = Task::done(Message::RefreshLibrary);
                        return match self.loads.accept(ticket, document) {
                            Some(document) => Task::batch([refresh, self.activate(document)]),
                            None => refresh,
                        };
                    }
                    Err(e) => {
                        tracing::error!("Upload error: {}", e);
                        self.error = Some(UPLOAD_FAILED.to_string());
                    }
                }
            }
            Message::PageImageLoaded(document_id, page_id, result) => {
                let Some(book) = self.book.as_mut().filter(|b| b.document_id() == document_id)
                else {
                    return Task::none();
                };
                match result {
                    Ok(bytes) => book.insert_image(page_id, bytes),
                    Err(e) => tracing::error!("Failed to load page image {}: {}", page_id, e),
                }
            }
            Message::NextPage => {
                if let Some(book) = self.book.as_mut() {
                    self.navigator.next(book);
                }
                return self.start_flip();
            }
            Message::PrevPage => {
                if let Some(book) = self.book.as_mut() {
                    self.navigator.prev(book);
                }
                return self.start_flip();
            }
            Message::GoToPage(page_number) => {
                if let Some(book) = self.book.as_mut() {
                    self.navigator.go_to(page_number, book);
                }
                return self.start_flip();
            }
            Message::FlipCompleted(document_id, target) => {
                let landed = self
                    .book
                    .as_mut()
                    .filter(|b| b.document_id() == document_id)
                    .and_then(|b| b.complete(target));
                if let Some(index) = landed {
                    self.navigator.on_external_flip(index);
                }
            }
        }
        Task::none()
    }

    /// Replace the active document and start fetching its page images
    fn activate(&mut self, document: Document) -> Task<Message> {
        tracing::info!(
            id = document.id,
            title = %document.title,
            pages = document.total_pages,
            "opening document"
        );
        self.navigator.reset(document.page_bound());
        let book = Book::new(&document);

        let fetches = document.pages.iter().take(document.page_bound()).map(|page| {
            let store = self.store.clone();
            let page = page.clone();
            let page_id = page.id;
            let document_id = document.id;
            Task::perform(
                async move {
                    store
                        .fetch_page_image(&page)
                        .await
                        .map_err(|e| e.to_string())
                },
                move |result| Message::PageImageLoaded(document_id, page_id, result),
            )
        });
        let task = Task::batch(fetches.collect::<Vec<_>>());

        self.book = Some(book);
        self.current = Some(document);
        task
    }

    /// Schedule completion of a flip the book just accepted
    fn start_flip(&mut self) -> Task<Message> {
        let Some(book) = self.book.as_mut() else {
            return Task::none();
        };
        let Some(target) = book.take_request() else {
            return Task::none();
        };
        let document_id = book.document_id();
        let delay = self.config.flipping_time();
        Task::perform(async move { tokio::time::sleep(delay).await }, move |_| {
            Message::FlipCompleted(document_id, target)
        })
    }

    fn view(&self) -> Element<Message> {
        let menu_button = button(text(if self.show_menu { "Close" } else { "Menu" }))
            .on_press(Message::ToggleMenu);

        let main_content: Element<Message> = match (&self.current, &self.book) {
            (Some(document), Some(book)) if document.has_pages() => self.reader(document, book),
            (Some(_), _) => centered(
                column![
                    text("Processing document...").size(20),
                    text("Please wait while pages are being generated").size(14),
                ]
                .spacing(8)
                .align_x(Alignment::Center),
            ),
            (None, _) => centered(
                column![
                    text("Document Viewer").size(32),
                    text("Upload a document or select from the menu to begin").size(16),
                ]
                .spacing(20)
                .align_x(Alignment::Center),
            ),
        };

        let body = if self.show_menu {
            row![self.sidebar(), main_content].spacing(10)
        } else {
            row![main_content]
        };

        column![row![menu_button, horizontal_space()], body]
            .spacing(10)
            .padding(10)
            .into()
    }

    fn sidebar(&self) -> Element<Message> {
        let upload = button(text("Upload Document"))
            .width(Length::Fill)
            .style(button::success)
            .on_press_maybe((!self.is_uploading).then_some(Message::PickUpload));

        let mut entries = column![
            text("Document Library").size(24),
            upload,
        ]
        .spacing(10);

        if self.is_uploading {
            entries = entries.push(text("Uploading...").size(14));
        }
        if let Some(error) = &self.error {
            entries = entries.push(text(error).size(14).style(text::danger));
        }

        for summary in &self.documents {
            let active = self.current.as_ref().map(|d| d.id) == Some(summary.id);
            let entry = button(
                column![
                    text(&summary.title).size(16),
                    text(summary.subtitle()).size(12),
                ]
                .spacing(4),
            )
            .width(Length::Fill)
            .style(if active {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::SelectDocument(summary.id));
            entries = entries.push(entry);
        }

        scrollable(entries.padding(10))
            .width(Length::Fixed(320.0))
            .height(Length::Fill)
            .into()
    }

    fn reader<'a>(&'a self, document: &'a Document, book: &'a Book) -> Element<'a, Message> {
        let page_view: Element<Message> = match book.active_image() {
            Some(handle) => img(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => centered(text(format!(
                "Rendering page... ({}/{})",
                book.loaded_images(),
                book.page_count()
            ))),
        };
        let page_number = book
            .active_page()
            .map(|p| p.page_number.to_string())
            .unwrap_or_default();

        let surface = container(
            column![page_view, text(page_number).size(10)].align_x(Alignment::Center),
        )
        .padding(24)
        .width(Length::Fill)
        .height(Length::FillPortion(5))
        .center_x(Length::Fill);

        let mut pager = row![].spacing(8).align_y(Alignment::Center);
        for item in self.navigator.window() {
            let cell: Element<Message> = match item.page_number() {
                Some(n) => button(text(n.to_string()))
                    .style(if self.navigator.is_current(n) {
                        button::primary
                    } else {
                        button::secondary
                    })
                    .on_press(Message::GoToPage(n))
                    .into(),
                None => text(item.to_string()).into(),
            };
            pager = pager.push(container(cell).id(container::Id::new(item.key())));
        }

        let navigation = row![
            button("prev").on_press_maybe(
                (self.navigator.can_prev() && !book.is_flipping()).then_some(Message::PrevPage),
            ),
            pager,
            button("next").on_press_maybe(
                (self.navigator.can_next() && !book.is_flipping()).then_some(Message::NextPage),
            ),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        column![
            surface,
            navigation,
            text(&document.title).size(20),
            text(self.navigator.caption()).size(14),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

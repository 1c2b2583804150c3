//! Client-side interaction state as a plain value.
//!
//! Front ends hold one [`ViewState`], feed user intents into
//! [`ViewState::apply`], and carry out the returned [`Effect`]. Nothing here
//! performs I/O, so every transition can be replayed and tested in isolation.

use serde::{Deserialize, Serialize};

use crate::domain::books::{Book, BookStatus, NewBook};
use crate::domain::ids::{BookId, UserProfile};
use crate::domain::listing::LibraryFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Library,
    Stats,
    BookForm,
}

/// The add/edit form. `editing` is `None` for a new book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookForm {
    pub editing: Option<BookId>,
    pub draft: NewBook,
}

impl BookForm {
    fn from_book(book: &Book) -> Self {
        Self {
            editing: Some(book.id),
            draft: NewBook {
                title: book.title.clone(),
                author: book.author.clone(),
                genre: book.genre.clone(),
                total_pages: book.total_pages,
                current_page: book.current_page,
                status: Some(book.status),
                year: book.year,
                rating: book.rating,
                notes: book.notes.clone(),
                review: book.review.clone(),
                cover_url: book.cover_url.clone(),
                start_date: book.start_date,
                finish_date: book.finish_date,
                created_at: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub user: Option<UserProfile>,
    pub view: View,
    pub filters: LibraryFilter,
    pub form: Option<BookForm>,
    /// A delete waiting for confirmation.
    pub pending_delete: Option<BookId>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    SelectUser(UserProfile),
    Logout,
    ShowLibrary,
    ShowStats,
    SetSearch(String),
    SetStatusFilter(Option<BookStatus>),
    SetGenreFilter(Option<String>),
    ClearFilters,
    OpenNewBook,
    OpenEditBook(Book),
    UpdateDraft(NewBook),
    SubmitForm,
    CloseForm,
    SaveSucceeded,
    SaveFailed(String),
    RequestDelete(BookId),
    ConfirmDelete,
    CancelDelete,
    DeleteSucceeded,
    DeleteFailed(String),
    DismissError,
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Re-fetch the active reader's collection from the store.
    RefreshBooks,
    CreateBook { book: NewBook },
    UpdateBook { id: BookId, book: NewBook },
    DeleteBook { id: BookId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewTransition {
    pub state: ViewState,
    pub effect: Option<Effect>,
}

const NO_READER: &str = "select a reader first";

impl ViewState {
    pub fn for_user(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            ..Default::default()
        }
    }

    pub fn apply(mut self, action: Action) -> ViewTransition {
        let effect = match action {
            Action::SelectUser(user) => {
                self = Self::for_user(user);
                Some(Effect::RefreshBooks)
            }
            Action::Logout => {
                self = Self::default();
                None
            }
            Action::ShowLibrary => {
                self.view = View::Library;
                None
            }
            Action::ShowStats => {
                self.view = View::Stats;
                None
            }
            Action::SetSearch(term) => {
                let term = term.trim().to_string();
                self.filters.search = (!term.is_empty()).then_some(term);
                None
            }
            Action::SetStatusFilter(status) => {
                self.filters.status = status;
                None
            }
            Action::SetGenreFilter(genre) => {
                self.filters.genre = genre.filter(|g| !g.trim().is_empty());
                None
            }
            Action::ClearFilters => {
                self.filters = LibraryFilter::default();
                None
            }
            Action::OpenNewBook => self.open_form(BookForm::default()),
            Action::OpenEditBook(book) => self.open_form(BookForm::from_book(&book)),
            Action::UpdateDraft(draft) => {
                if let Some(form) = self.form.as_mut() {
                    form.draft = draft;
                }
                None
            }
            Action::SubmitForm => self.submit_form(),
            Action::CloseForm => {
                self.form = None;
                self.view = View::Library;
                None
            }
            Action::SaveSucceeded => {
                self.form = None;
                self.error = None;
                self.view = View::Library;
                Some(Effect::RefreshBooks)
            }
            Action::SaveFailed(message) | Action::DeleteFailed(message) => {
                self.error = Some(message);
                None
            }
            Action::RequestDelete(id) => {
                if self.user.is_some() {
                    self.pending_delete = Some(id);
                } else {
                    self.error = Some(NO_READER.to_string());
                }
                None
            }
            Action::ConfirmDelete => self
                .pending_delete
                .take()
                .map(|id| Effect::DeleteBook { id }),
            Action::CancelDelete => {
                self.pending_delete = None;
                None
            }
            Action::DeleteSucceeded => {
                self.error = None;
                Some(Effect::RefreshBooks)
            }
            Action::DismissError => {
                self.error = None;
                None
            }
        };

        ViewTransition {
            state: self,
            effect,
        }
    }

    fn open_form(&mut self, form: BookForm) -> Option<Effect> {
        if self.user.is_none() {
            self.error = Some(NO_READER.to_string());
            return None;
        }
        self.form = Some(form);
        self.view = View::BookForm;
        self.error = None;
        None
    }

    fn submit_form(&mut self) -> Option<Effect> {
        let form = self.form.as_ref()?;
        let editing = form.editing;
        let draft = form.draft.clone().normalize();
        if let Err(message) = draft.validate() {
            self.error = Some(message.to_string());
            return None;
        }
        self.error = None;
        Some(match editing {
            Some(id) => Effect::UpdateBook { id, book: draft },
            None => Effect::CreateBook { book: draft },
        })
    }
}

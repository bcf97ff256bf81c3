//! In-memory book catalog.
//!
//! [`Catalog`] owns every [`Book`] and hands out clones only, so callers can
//! never reach into stored records. Each operation runs under a single lock
//! scope: a read lock for queries and a write lock for mutations, which makes
//! check-then-mutate sequences such as borrowing atomic.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use time::{Duration, OffsetDateTime};

use super::models::{Book, BookFilter, BookPatch, NewBook};

/// Fixed loan period applied on every borrow.
pub const LOAN_PERIOD: Duration = Duration::days(14);

/// Number of books returned by [`Catalog::recommend`].
pub const RECOMMENDATION_COUNT: usize = 3;

/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{field} is required and cannot be empty")]
    Validation { field: &'static str },

    #[error("book '{id}' not found")]
    NotFound { id: String },

    #[error("book '{id}' is already borrowed")]
    AlreadyBorrowed { id: String },

    #[error("book '{id}' not found or not currently borrowed")]
    NotBorrowed { id: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Default)]
struct Shelf {
    books: Vec<Book>,
    next_id: u64,
}

impl Shelf {
    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    /// Next counter value not already taken by a stored id.
    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

/// The authoritative book collection.
#[derive(Debug, Default)]
pub struct Catalog {
    shelf: RwLock<Shelf>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the three starter books, ids `1` to `3`.
    #[must_use]
    pub fn with_starter_books() -> Self {
        let catalog = Self::new();
        for (title, author, genre) in [
            ("The Great Gatsby", "F. Scott Fitzgerald", "Fiction"),
            ("1984", "George Orwell", "Dystopian"),
            ("To Kill a Mockingbird", "Harper Lee", "Classic"),
        ] {
            let seeded = catalog.add(NewBook {
                title: title.to_string(),
                author: author.to_string(),
                genre: genre.to_string(),
            });
            debug_assert!(seeded.is_ok());
        }
        catalog
    }

    // Nothing panics while the lock is held; a poisoned guard is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().books.is_empty()
    }

    /// Books matching every non-blank filter (case-insensitive substring), in
    /// insertion order.
    pub fn list(&self, filter: &BookFilter) -> Vec<Book> {
        let title = needle(filter.title.as_deref());
        let author = needle(filter.author.as_deref());
        let genre = needle(filter.genre.as_deref());

        self.read()
            .books
            .iter()
            .filter(|book| {
                contains(&book.title, title.as_deref())
                    && contains(&book.author, author.as_deref())
                    && contains(&book.genre, genre.as_deref())
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Book> {
        self.read().books.iter().find(|book| book.id == id).cloned()
    }

    /// Adds a book with a freshly assigned id. Fields are stored trimmed.
    pub fn add(&self, new_book: NewBook) -> CatalogResult<Book> {
        let title = required("title", &new_book.title)?;
        let author = required("author", &new_book.author)?;
        let genre = required("genre", &new_book.genre)?;

        let mut shelf = self.write();
        let book = Book {
            id: shelf.allocate_id(),
            title,
            author,
            genre,
            is_borrowed: false,
            borrower_id: None,
            due_date: None,
        };
        shelf.books.push(book.clone());

        tracing::debug!(book_id = %book.id, title = %book.title, "book added");
        Ok(book)
    }

    /// Applies the descriptive fields of `patch`. A blank field rejects the
    /// whole patch.
    pub fn update(&self, id: &str, patch: BookPatch) -> CatalogResult<Book> {
        let title = optional("title", patch.title.as_deref())?;
        let author = optional("author", patch.author.as_deref())?;
        let genre = optional("genre", patch.genre.as_deref())?;

        let mut shelf = self.write();
        let book = shelf.find_mut(id).ok_or_else(|| CatalogError::NotFound {
            id: id.to_string(),
        })?;

        if let Some(title) = title {
            book.title = title;
        }
        if let Some(author) = author {
            book.author = author;
        }
        if let Some(genre) = genre {
            book.genre = genre;
        }

        tracing::debug!(book_id = %id, "book updated");
        Ok(book.clone())
    }

    /// Removes the book; `false` when no such id exists.
    pub fn delete(&self, id: &str) -> bool {
        let mut shelf = self.write();
        match shelf.position(id) {
            Some(index) => {
                shelf.books.remove(index);
                tracing::debug!(book_id = %id, "book deleted");
                true
            }
            None => false,
        }
    }

    /// Lends the book to `borrower_id`, due [`LOAN_PERIOD`] from now.
    pub fn borrow(&self, id: &str, borrower_id: &str) -> CatalogResult<Book> {
        self.borrow_at(id, borrower_id, OffsetDateTime::now_utc())
    }

    /// [`Catalog::borrow`] with an explicit clock reading.
    pub fn borrow_at(
        &self,
        id: &str,
        borrower_id: &str,
        now: OffsetDateTime,
    ) -> CatalogResult<Book> {
        let borrower_id = required("borrowerId", borrower_id)?;

        let mut shelf = self.write();
        let book = shelf.find_mut(id).ok_or_else(|| CatalogError::NotFound {
            id: id.to_string(),
        })?;

        if book.is_borrowed {
            return Err(CatalogError::AlreadyBorrowed { id: id.to_string() });
        }

        book.is_borrowed = true;
        book.borrower_id = Some(borrower_id);
        book.due_date = Some(now + LOAN_PERIOD);

        tracing::info!(
            book_id = %id,
            borrower_id = ?book.borrower_id,
            due_date = ?book.due_date,
            "book borrowed"
        );
        Ok(book.clone())
    }

    /// Clears the loan on a borrowed book.
    pub fn return_book(&self, id: &str) -> CatalogResult<Book> {
        let mut shelf = self.write();
        let book = shelf
            .find_mut(id)
            .filter(|book| book.is_borrowed)
            .ok_or_else(|| CatalogError::NotBorrowed { id: id.to_string() })?;

        book.is_borrowed = false;
        book.borrower_id = None;
        book.due_date = None;

        tracing::info!(book_id = %id, "book returned");
        Ok(book.clone())
    }

    /// The first [`RECOMMENDATION_COUNT`] books in insertion order.
    pub fn recommend(&self) -> Vec<Book> {
        self.read()
            .books
            .iter()
            .take(RECOMMENDATION_COUNT)
            .cloned()
            .collect()
    }
}

fn required(field: &'static str, value: &str) -> CatalogResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::Validation { field });
    }
    Ok(value.to_string())
}

/// Lowercased filter value, or `None` when absent or blank.
fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |needle| haystack.to_lowercase().contains(needle))
}

fn optional(field: &'static str, value: Option<&str>) -> CatalogResult<Option<String>> {
    value.map(|value| required(field, value)).transpose()
}

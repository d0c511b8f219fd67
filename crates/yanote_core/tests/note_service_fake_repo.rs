use std::cell::RefCell;
use std::collections::BTreeSet;
use yanote_core::{
    Note, NoteId, NoteInput, NoteRepository, NoteService, NoteServiceError, RepoError, RepoResult,
    User, UserId,
};

/// In-memory repository; enforces slug uniqueness like the SQLite one.
#[derive(Default)]
struct MemoryNoteRepository {
    notes: RefCell<Vec<Note>>,
}

impl NoteRepository for MemoryNoteRepository {
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;
        let mut notes = self.notes.borrow_mut();
        if notes.iter().any(|stored| stored.slug == note.slug) {
            return Err(RepoError::DuplicateSlug(note.slug.clone()));
        }
        notes.push(note.clone());
        Ok(note.id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;
        let mut notes = self.notes.borrow_mut();
        if notes
            .iter()
            .any(|stored| stored.slug == note.slug && stored.id != note.id)
        {
            return Err(RepoError::DuplicateSlug(note.slug.clone()));
        }
        let stored = notes
            .iter_mut()
            .find(|stored| stored.id == note.id)
            .ok_or(RepoError::NotFound(note.id))?;
        stored.title = note.title.clone();
        stored.text = note.text.clone();
        stored.slug = note.slug.clone();
        Ok(())
    }

    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        Ok(self
            .notes
            .borrow()
            .iter()
            .find(|note| note.slug == slug)
            .cloned())
    }

    fn find_all_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        Ok(self
            .notes
            .borrow()
            .iter()
            .filter(|note| note.author == Some(author))
            .cloned()
            .collect())
    }

    fn conflicting_slugs(
        &self,
        slug: &str,
        excluding: Option<NoteId>,
    ) -> RepoResult<BTreeSet<String>> {
        Ok(self
            .notes
            .borrow()
            .iter()
            .filter(|note| note.slug == slug && Some(note.id) != excluding)
            .map(|note| note.slug.clone())
            .collect())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let mut notes = self.notes.borrow_mut();
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn count_notes(&self) -> RepoResult<u64> {
        Ok(self.notes.borrow().len() as u64)
    }
}

#[test]
fn service_works_against_any_repository() {
    let service = NoteService::new(MemoryNoteRepository::default());
    let author = User::new("author");
    let reader = User::new("reader");

    let note = service
        .create(&author, NoteInput::new("Новый заголовок", "Текст", ""))
        .unwrap();
    assert_eq!(note.slug, "novyij-zagolovok");
    assert_eq!(service.count().unwrap(), 1);

    assert!(matches!(
        service.create(&reader, NoteInput::new("Другой", "", "novyij-zagolovok")),
        Err(NoteServiceError::DuplicateSlug(_))
    ));
    assert!(matches!(
        service.retrieve(&reader, "novyij-zagolovok"),
        Err(NoteServiceError::NotFound(_))
    ));
    assert!(service.list(&reader).unwrap().is_empty());

    let updated = service
        .update(
            &author,
            "novyij-zagolovok",
            NoteInput::new("Правка", "Другой текст", "novyij-zagolovok"),
        )
        .unwrap();
    assert_eq!(updated.id, note.id);
    assert_eq!(updated.title, "Правка");

    service.delete(&author, "novyij-zagolovok").unwrap();
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn orphaned_note_is_visible_to_nobody() {
    let repo = MemoryNoteRepository::default();
    let mut orphan = Note::new(UserId::new_v4(), "Заголовок", "", "orphan");
    orphan.author = None;
    repo.insert_note(&orphan).unwrap();

    let service = NoteService::new(repo);
    let anyone = User::new("anyone");
    assert!(matches!(
        service.retrieve(&anyone, "orphan"),
        Err(NoteServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(&anyone, "orphan"),
        Err(NoteServiceError::NotFound(_))
    ));
    assert_eq!(service.count().unwrap(), 1);
}

/// Reports no conflicts, as if a concurrent writer took the slug after the
/// uniqueness check; only the insert/update itself rejects the duplicate.
#[derive(Default)]
struct RacingNoteRepository {
    inner: MemoryNoteRepository,
}

impl NoteRepository for RacingNoteRepository {
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        self.inner.insert_note(note)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        self.inner.update_note(note)
    }

    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        self.inner.find_by_slug(slug)
    }

    fn find_all_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        self.inner.find_all_by_author(author)
    }

    fn conflicting_slugs(
        &self,
        _slug: &str,
        _excluding: Option<NoteId>,
    ) -> RepoResult<BTreeSet<String>> {
        Ok(BTreeSet::new())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        self.inner.delete_note(id)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        self.inner.count_notes()
    }
}

const DUPLICATE_MESSAGE: &str =
    "taken - такой slug уже существует, введите уникальное значение.";

#[test]
fn storage_rejection_on_create_is_reported_as_duplicate_slug() {
    let service = NoteService::new(RacingNoteRepository::default());
    let author = User::new("author");
    let other = User::new("other");
    service
        .create(&author, NoteInput::new("Заголовок", "", "taken"))
        .unwrap();

    let err = service
        .create(&other, NoteInput::new("Другой", "", "taken"))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::DuplicateSlug(ref slug) if slug == "taken"));
    assert_eq!(err.to_string(), DUPLICATE_MESSAGE);
    assert_eq!(
        err.field_error().map(|(_, message)| message).as_deref(),
        Some(DUPLICATE_MESSAGE)
    );
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn storage_rejection_on_update_is_reported_as_duplicate_slug() {
    let service = NoteService::new(RacingNoteRepository::default());
    let author = User::new("author");
    service
        .create(&author, NoteInput::new("Первая", "", "first"))
        .unwrap();
    service
        .create(&author, NoteInput::new("Вторая", "", "taken"))
        .unwrap();

    let err = service
        .update(&author, "first", NoteInput::new("Первая", "", "taken"))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::DuplicateSlug(ref slug) if slug == "taken"));
    assert_eq!(err.to_string(), DUPLICATE_MESSAGE);
    assert_eq!(service.count().unwrap(), 2);
    assert_eq!(service.retrieve(&author, "first").unwrap().title, "Первая");
}

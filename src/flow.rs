/// Pages of the student-facing wizard. Pure session bookkeeping layered
/// on top of the diary facade; nothing here touches storage, so a UI (or
/// a test) can drive navigation without a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    CheckNotes,
    Menu,
    WriteEmotion,
    WriteGratitude,
    WriteMessage,
    ConfirmSubmit,
    ViewEntries,
}

/// Draft field values the wizard accumulates across pages. They survive
/// back-navigation and are cleared on submit or logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub emotion: Option<String>,
    pub gratitude: String,
    pub message: String,
}

pub struct SessionFlow {
    page: Page,
    back: Vec<Page>,
    draft: Draft,
}

impl SessionFlow {
    pub fn new() -> Self {
        SessionFlow {
            page: Page::Login,
            back: Vec::new(),
            draft: Draft::default(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Navigate forward, remembering where we came from.
    pub fn go_to(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.back.push(self.page);
        self.page = page;
    }

    /// Pop the back-stack; stays put at the bottom.
    pub fn back(&mut self) -> Page {
        if let Some(previous) = self.back.pop() {
            self.page = previous;
        }
        self.page
    }

    /// A fresh login lands on the notes check, with no history behind it.
    pub fn logged_in(&mut self) {
        self.page = Page::CheckNotes;
        self.back.clear();
        self.draft = Draft::default();
    }

    /// A successful submit clears the draft and returns to the menu.
    pub fn submitted(&mut self) {
        self.draft = Draft::default();
        self.back.clear();
        self.page = Page::Menu;
    }

    pub fn logout(&mut self) {
        *self = SessionFlow::new();
    }
}

impl Default for SessionFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome category of one analyzed ligand, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LigandStatus {
    Bound,
    Unbound,
    Invalid,
}

#[derive(Debug, Clone)]
pub enum Progress {
    IndexBuilt { atom_count: usize },

    LigandsStart { total: u64 },
    LigandDone { index: usize, status: LigandStatus },
    LigandsFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

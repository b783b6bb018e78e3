/// Surrogate key assigned by the store on insert.
pub type Id = i64;

/// Kinds of rows the admission store holds, used in error messages and
/// deletion plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    University,
    College,
    Program,
    Course,
    Branch,
    ProgramScheduled,
    Application,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::University => "university",
            EntityKind::College => "college",
            EntityKind::Program => "program",
            EntityKind::Course => "course",
            EntityKind::Branch => "branch",
            EntityKind::ProgramScheduled => "program scheduled",
            EntityKind::Application => "application",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

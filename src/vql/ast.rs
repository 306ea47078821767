/// One parsed VQL statement. Only the surface forms the command client
/// actually issues are represented; there is no general expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Search {
        index: Option<String>,
        terms: String,
        engine: Option<String>,
    },
    Index {
        payload: String,
        doc: Option<String>,
        format: Option<String>,
        index: Option<String>,
    },
    Use {
        index: String,
    },
    Show {
        target: ShowTarget,
    },
    Drop {
        target: String,
    },
    Alias {
        index: String,
        alias: String,
    },
    UnAlias {
        index: Option<String>,
        alias: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    Indices,
    Aliases,
}

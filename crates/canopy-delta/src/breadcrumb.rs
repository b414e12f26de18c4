use std::fmt;

/// One step in a breadcrumb path: a map key or a sequence index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// The path from the tree root to the node currently being diffed.
///
/// Breadcrumbs are a stack-borrowed linked list: each recursion level builds
/// a frame on its own stack and passes a reference down, so hints policies
/// get context-sensitive paths without any allocation. A path string is only
/// built when an error or a log line actually needs one.
#[derive(Clone, Copy, Debug)]
pub struct Breadcrumb<'a> {
    parent: Option<&'a Breadcrumb<'a>>,
    segment: Option<Segment<'a>>,
}

impl<'a> Breadcrumb<'a> {
    /// The root of the tree (empty path).
    pub const fn root() -> Self {
        Self {
            parent: None,
            segment: None,
        }
    }

    /// Extend the path with a map key.
    pub fn child_key(&'a self, key: &'a str) -> Breadcrumb<'a> {
        Breadcrumb {
            parent: Some(self),
            segment: Some(Segment::Key(key)),
        }
    }

    /// Extend the path with a sequence index.
    pub fn child_index(&'a self, index: usize) -> Breadcrumb<'a> {
        Breadcrumb {
            parent: Some(self),
            segment: Some(Segment::Index(index)),
        }
    }

    /// The final path step, if any.
    pub fn segment(&self) -> Option<Segment<'a>> {
        self.segment
    }

    /// Number of steps from the root.
    pub fn depth(&self) -> usize {
        let mut depth = usize::from(self.segment.is_some());
        let mut current = self.parent;
        while let Some(bc) = current {
            depth += usize::from(bc.segment.is_some());
            current = bc.parent;
        }
        depth
    }

    /// Render the full path, e.g. `$.entities[3].hp`.
    pub fn render(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(bc) = current {
            if let Some(segment) = bc.segment {
                segments.push(segment);
            }
            current = bc.parent;
        }
        segments.reverse();

        let mut out = String::from("$");
        for segment in segments {
            match segment {
                Segment::Key(key) => {
                    out.push('.');
                    out.push_str(key);
                }
                Segment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for Breadcrumb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

use std::fmt;

use digest_logging::digest_warn;
use serde::{Deserialize, Serialize};

/// Opaque folder handle; a source must be able to resolve it again later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FolderId(String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    pub id: FolderId,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn leaf(name: impl Into<String>, id: FolderId) -> Self {
        Self {
            name: name.into(),
            id,
            children: Vec::new(),
        }
    }

    pub fn find(&self, id: &FolderId) -> Option<&FolderNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth-first listing of `(depth, node)` pairs, root first.
    pub fn flatten(&self) -> Vec<(usize, &FolderNode)> {
        let mut out = Vec::new();
        self.flatten_into(0, &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a FolderNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.flatten_into(depth + 1, out);
        }
    }
}

/// Read access to a folder of some mail store.
pub trait MailFolder: Sized {
    type Error: fmt::Display;

    fn name(&self) -> Result<String, Self::Error>;
    fn id(&self) -> Result<FolderId, Self::Error>;
    fn subfolders(&self) -> Result<Vec<Self>, Self::Error>;
}

/// Walks a folder hierarchy into a tree of names and ids.
///
/// A folder that fails to report its name, id or children is skipped along
/// with its subtree and the walk continues; `None` only when the root itself
/// is unusable.
pub fn build_folder_tree<F: MailFolder>(folder: &F) -> Option<FolderNode> {
    let (name, id) = match folder
        .name()
        .and_then(|name| folder.id().map(|id| (name, id)))
    {
        Ok(pair) => pair,
        Err(err) => {
            digest_warn!("Skipping folder that cannot be described: {}", err);
            return None;
        }
    };

    let subfolders = match folder.subfolders() {
        Ok(subfolders) => subfolders,
        Err(err) => {
            digest_warn!("Skipping folder {:?} whose children cannot be listed: {}", name, err);
            return None;
        }
    };

    let children = subfolders.iter().filter_map(build_folder_tree).collect();
    Some(FolderNode { name, id, children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Clone)]
    struct FakeFolder {
        name: &'static str,
        broken: bool,
        children: Vec<FakeFolder>,
    }

    fn folder(name: &'static str, children: Vec<FakeFolder>) -> FakeFolder {
        FakeFolder {
            name,
            broken: false,
            children,
        }
    }

    impl MailFolder for FakeFolder {
        type Error = String;

        fn name(&self) -> Result<String, String> {
            Ok(self.name.to_string())
        }

        fn id(&self) -> Result<FolderId, String> {
            Ok(FolderId::new(format!("id:{}", self.name)))
        }

        fn subfolders(&self) -> Result<Vec<Self>, String> {
            if self.broken {
                Err(format!("{} is not accessible", self.name))
            } else {
                Ok(self.children.clone())
            }
        }
    }

    #[test]
    fn builds_nested_tree() {
        let root = folder("Inbox", vec![folder("News", vec![folder("Daily", vec![])])]);
        let tree = build_folder_tree(&root).unwrap();

        assert_eq!(tree.name, "Inbox");
        assert_eq!(tree.children[0].children[0].id, FolderId::new("id:Daily"));
        let names: Vec<(usize, &str)> = tree
            .flatten()
            .into_iter()
            .map(|(depth, node)| (depth, node.name.as_str()))
            .collect();
        assert_eq!(names, vec![(0, "Inbox"), (1, "News"), (2, "Daily")]);
    }

    #[test]
    fn broken_folder_is_skipped_and_siblings_kept() {
        let mut broken = folder("Archive", vec![folder("Hidden", vec![])]);
        broken.broken = true;
        let root = folder("Inbox", vec![broken, folder("News", vec![])]);

        let tree = build_folder_tree(&root).unwrap();
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["News"]);
        assert!(tree.find(&FolderId::new("id:Hidden")).is_none());
        assert!(tree.find(&FolderId::new("id:News")).is_some());
    }

    #[test]
    fn unusable_root_yields_none() {
        let mut root = folder("Inbox", vec![]);
        root.broken = true;
        assert!(build_folder_tree(&root).is_none());
    }
}

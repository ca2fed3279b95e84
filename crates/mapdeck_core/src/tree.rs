use std::fmt;

use crate::view_model::{TreeLineKind, TreeLineView};
use crate::{Course, CourseMap, Node};

/// Index path to a section (`[i]`) or a container inside it (`[i, j, ..]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreePath(pub Vec<usize>);

impl TreePath {
    /// Parses dotted indices such as `0.2.1`.
    pub fn parse(raw: &str) -> Option<Self> {
        let indices = raw
            .trim()
            .split('.')
            .map(|part| part.trim().parse::<usize>().ok())
            .collect::<Option<Vec<_>>>()?;
        if indices.is_empty() {
            None
        } else {
            Some(Self(indices))
        }
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Container {
        title: String,
        expanded: bool,
        children: Vec<TreeNode>,
    },
    Leaf {
        title: String,
    },
}

impl TreeNode {
    fn from_node(node: &Node) -> Self {
        if node.is_container() {
            TreeNode::Container {
                title: node.title.clone(),
                expanded: true,
                children: node.rendered_children().iter().map(Self::from_node).collect(),
            }
        } else {
            TreeNode::Leaf {
                title: node.title.clone(),
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            TreeNode::Container {
                title, children, ..
            } => {
                out.push('\n');
                out.push_str(title);
                for child in children {
                    child.collect_text(out);
                }
            }
            TreeNode::Leaf { title } => {
                out.push('\n');
                out.push_str(title);
            }
        }
    }
}

/// One collapsible course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSection {
    pub title: String,
    pub expanded: bool,
    pub visible: bool,
    pub nodes: Vec<TreeNode>,
    search_text: String,
}

impl TreeSection {
    fn from_course(course: &Course) -> Self {
        let nodes: Vec<TreeNode> = course
            .details
            .hierarchy
            .iter()
            .map(TreeNode::from_node)
            .collect();
        let mut text = course.title.clone();
        for node in &nodes {
            node.collect_text(&mut text);
        }
        Self {
            title: course.title.clone(),
            expanded: false,
            visible: true,
            nodes,
            search_text: text.to_lowercase(),
        }
    }
}

/// Collapsible, filterable projection of the course map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeView {
    sections: Vec<TreeSection>,
    query: String,
}

impl TreeView {
    /// Builds every section collapsed, then applies `query`.
    pub fn build(map: Option<&CourseMap>, query: &str) -> Self {
        let sections = map
            .map(|map| map.courses.iter().map(TreeSection::from_course).collect())
            .unwrap_or_default();
        let mut view = Self {
            sections,
            query: String::new(),
        };
        view.filter(query);
        view
    }

    pub fn sections(&self) -> &[TreeSection] {
        &self.sections
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Hides sections whose text does not contain `query`, ignoring case.
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
        let needle = query.to_lowercase();
        for section in &mut self.sections {
            section.visible = section.search_text.contains(&needle);
        }
    }

    /// Flips the expansion of the section or container at `path`.
    pub fn toggle(&mut self, path: &TreePath) -> bool {
        let Some((&first, rest)) = path.0.split_first() else {
            return false;
        };
        let Some(section) = self.sections.get_mut(first) else {
            return false;
        };
        if rest.is_empty() {
            section.expanded = !section.expanded;
            return true;
        }

        let mut nodes = &mut section.nodes;
        let (&last, walk) = match rest.split_last() {
            Some(split) => split,
            None => return false,
        };
        for &index in walk {
            match nodes.get_mut(index) {
                Some(TreeNode::Container { children, .. }) => nodes = children,
                _ => return false,
            }
        }
        match nodes.get_mut(last) {
            Some(TreeNode::Container { expanded, .. }) => {
                *expanded = !*expanded;
                true
            }
            _ => false,
        }
    }

    /// Flattens visible sections and expanded containers into display lines.
    pub fn lines(&self) -> Vec<TreeLineView> {
        let mut lines = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            if !section.visible {
                continue;
            }
            let path = vec![index];
            lines.push(TreeLineView {
                depth: 0,
                path: TreePath(path.clone()),
                label: section.title.clone(),
                kind: TreeLineKind::Course {
                    expanded: section.expanded,
                },
            });
            if section.expanded {
                push_node_lines(&section.nodes, &path, 1, &mut lines);
            }
        }
        lines
    }
}

fn push_node_lines(nodes: &[TreeNode], parent: &[usize], depth: usize, out: &mut Vec<TreeLineView>) {
    for (index, node) in nodes.iter().enumerate() {
        let mut path = parent.to_vec();
        path.push(index);
        match node {
            TreeNode::Container {
                title,
                expanded,
                children,
            } => {
                out.push(TreeLineView {
                    depth,
                    path: TreePath(path.clone()),
                    label: title.clone(),
                    kind: TreeLineKind::Container {
                        expanded: *expanded,
                    },
                });
                if *expanded {
                    push_node_lines(children, &path, depth + 1, out);
                }
            }
            TreeNode::Leaf { title } => out.push(TreeLineView {
                depth,
                path: TreePath(path),
                label: title.clone(),
                kind: TreeLineKind::Leaf,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_paths() {
        assert_eq!(TreePath::parse("0.2.1"), Some(TreePath(vec![0, 2, 1])));
        assert_eq!(TreePath::parse(" 3 "), Some(TreePath(vec![3])));
        assert_eq!(TreePath::parse("a.1"), None);
        assert_eq!(TreePath::parse(""), None);
        assert_eq!(TreePath(vec![1, 4]).to_string(), "1.4");
    }
}

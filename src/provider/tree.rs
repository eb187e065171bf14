//! Tree flattening for display

use super::Item;

const BRANCH: &str = " ├── ";
const LAST_BRANCH: &str = " └── ";
const CONTINUATION: &str = " │   ";
const BLANK: &str = "     ";

/// A flattened item together with the tree-drawing prefix for its depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub prefix: String,
    /// Item with `tree_level` assigned and no children
    pub item: Item,
}

impl TreeRow {
    /// Prefix and display joined into one line
    pub fn line(&self) -> String {
        format!("{}{}", self.prefix, self.item.display)
    }
}

/// Depth-first rows: each item followed by its children
pub fn tree_rows(items: &[Item]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(items, 0, "", &mut rows);
    rows
}

/// Flatten nested items into one list, drawing the tree into `display`
pub fn flatten_tree(items: &[Item]) -> Vec<Item> {
    tree_rows(items)
        .into_iter()
        .map(|row| {
            let display = row.line();
            Item { display, ..row.item }
        })
        .collect()
}

fn push_rows(items: &[Item], level: usize, indent: &str, rows: &mut Vec<TreeRow>) {
    for (index, item) in items.iter().enumerate() {
        let is_last = index + 1 == items.len();

        let (prefix, child_indent) = if level == 0 {
            (String::new(), String::new())
        } else {
            let branch = if is_last { LAST_BRANCH } else { BRANCH };
            let rail = if is_last { BLANK } else { CONTINUATION };
            (format!("{}{}", indent, branch), format!("{}{}", indent, rail))
        };

        rows.push(TreeRow {
            prefix,
            item: Item {
                sub_items: Vec::new(),
                tree_level: level,
                ..item.clone()
            },
        });

        push_rows(&item.sub_items, level + 1, &child_indent, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(id: &str) -> Item {
        Item::directory(id, id, format!("/src/{}", id))
    }

    fn nest(mut parent: Item, children: Vec<Item>) -> Item {
        parent.sub_items = children;
        parent
    }

    #[test]
    fn test_flat_list_is_unchanged() {
        let items = vec![dir("a"), dir("b")];
        let flat = flatten_tree(&items);
        assert_eq!(flat, items);
    }

    #[test]
    fn test_worktree_children_drawn_as_tree() {
        let items = vec![
            Item::worktree("web", "/src/web", vec![dir("docs"), dir("src")]),
            dir("api"),
        ];

        let lines: Vec<String> = flatten_tree(&items).into_iter().map(|i| i.display).collect();
        insta::assert_debug_snapshot!(lines, @r###"
        [
            "[w] /src/web",
            " ├── [ ] docs",
            " └── [ ] src",
            "[ ] api",
        ]
        "###);
    }

    #[test]
    fn test_deeper_nesting_uses_rails() {
        let items = vec![nest(
            dir("root"),
            vec![nest(dir("a"), vec![dir("a1"), dir("a2")]), nest(dir("b"), vec![dir("b1")])],
        )];

        let flat = flatten_tree(&items);
        let lines: Vec<&str> = flat.iter().map(|i| i.display.as_str()).collect();
        insta::assert_debug_snapshot!(lines, @r###"
        [
            "[ ] root",
            " ├── [ ] a",
            " │    ├── [ ] a1",
            " │    └── [ ] a2",
            " └── [ ] b",
            "      └── [ ] b1",
        ]
        "###);

        let levels: Vec<usize> = flat.iter().map(|i| i.tree_level).collect();
        assert_eq!(levels, vec![0, 1, 2, 2, 1, 2]);
        assert!(flat.iter().all(|i| i.sub_items.is_empty()));
    }

    #[test]
    fn test_rows_keep_prefix_separate() {
        let items = vec![Item::worktree("web", "/src/web", vec![dir("docs")])];
        let rows = tree_rows(&items);

        assert_eq!(rows[1].prefix, " └── ");
        assert_eq!(rows[1].item.display, "[ ] docs");
        assert_eq!(rows[1].line(), " └── [ ] docs");
    }
}

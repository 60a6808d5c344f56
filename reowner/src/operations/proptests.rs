//! Property-based tests for the tree walk over generated trees.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use super::{OwnerMutator, RecordingReporter, RunEvent, TreeWalker};
use crate::attributes::Attributes;
use crate::fs::MemoryFilesystem;
use crate::identity::{Identity, Sid};

const ROOT: &str = "/t";
const OLD: u32 = 1;
const NEW: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    File,
    Dir,
    LinkDir,
}

#[derive(Debug, Clone)]
struct GenNode {
    path: PathBuf,
    parent: usize,
    kind: Kind,
    owner: u32,
    odd: bool,
}

#[derive(Debug, Clone)]
struct GenTree {
    nodes: Vec<GenNode>,
    root_owner: u32,
}

impl GenTree {
    fn build(&self) -> MemoryFilesystem {
        let mut fs = MemoryFilesystem::new(ROOT, Sid::unix_user(self.root_owner));
        for node in &self.nodes {
            let owner = Sid::unix_user(node.owner);
            fs = match node.kind {
                Kind::File => fs.with_file(&node.path, owner),
                Kind::Dir => fs.with_dir(&node.path, owner),
                Kind::LinkDir => fs.with_link_dir(&node.path, owner),
            };
            if node.odd {
                fs = fs.with_attributes(&node.path, Attributes::OFFLINE);
            }
        }
        fs
    }

    /// Whether `node` lies beneath only real directories.
    fn reachable(&self, index: usize) -> bool {
        let mut parent = self.nodes[index].parent;
        while parent != 0 {
            let node = &self.nodes[parent - 1];
            if node.kind != Kind::Dir {
                return false;
            }
            parent = node.parent;
        }
        true
    }

    fn reachable_dirs(&self) -> u64 {
        let count = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].kind == Kind::Dir && self.reachable(i))
            .count();
        count as u64 + 1
    }
}

// Each node picks a parent among the directories generated before it
// (index 0 is the root), so every path's parent exists.
fn tree_strategy() -> impl Strategy<Value = GenTree> {
    let kind = prop_oneof![
        4 => Just(Kind::File),
        3 => Just(Kind::Dir),
        1 => Just(Kind::LinkDir),
    ];
    (
        prop::collection::vec((any::<prop::sample::Index>(), kind, 0u32..3, prop::bool::weighted(0.1)), 0..40),
        0u32..3,
    )
        .prop_map(|(specs, root_owner)| {
            let mut nodes: Vec<GenNode> = Vec::new();
            let mut containers: Vec<usize> = vec![0];
            for (i, (pick, kind, owner, odd)) in specs.into_iter().enumerate() {
                let parent = containers[pick.index(containers.len())];
                let parent_path = if parent == 0 {
                    PathBuf::from(ROOT)
                } else {
                    nodes[parent - 1].path.clone()
                };
                nodes.push(GenNode {
                    path: parent_path.join(format!("n{i}")),
                    parent,
                    kind,
                    owner,
                    odd,
                });
                if kind != Kind::File {
                    containers.push(nodes.len());
                }
            }
            GenTree { nodes, root_owner }
        })
}

fn mutator(from: Option<u32>, dry_run: bool) -> OwnerMutator {
    OwnerMutator::new(
        from.map(|uid| Identity::from_sid(Sid::unix_user(uid))),
        Identity::from_sid(Sid::unix_user(NEW)),
        dry_run,
    )
}

fn walk(fs: &MemoryFilesystem, mutator: OwnerMutator) -> (super::RunSummary, RecordingReporter) {
    let mut reporter = RecordingReporter::new();
    let summary = TreeWalker::new(fs, mutator).run(Path::new(ROOT), &mut reporter);
    (summary, reporter)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Every discovered directory is processed exactly once, and only real
    // directories beneath real directories are discovered.
    #[test]
    fn walk_drains_frontier(tree in tree_strategy()) {
        let fs = tree.build();
        let (summary, reporter) = walk(&fs, mutator(Some(OLD), false));

        prop_assert!(summary.stats.is_drained());
        prop_assert_eq!(summary.stats.directories_discovered, tree.reachable_dirs());

        let progress = reporter
            .events
            .iter()
            .filter(|e| matches!(e, RunEvent::DirectoryProcessed(_)))
            .count() as u64;
        prop_assert_eq!(progress, summary.stats.directories_processed);
    }

    // With a wildcard source every reachable entry is reported at most once.
    #[test]
    fn walk_visits_each_entry_once(tree in tree_strategy()) {
        let fs = tree.build();
        let (summary, reporter) = walk(&fs, mutator(None, true));

        let changed = reporter.changed_paths();
        let unique: HashSet<&PathBuf> = changed.iter().collect();
        prop_assert_eq!(unique.len(), changed.len());
        prop_assert_eq!(changed.len() as u64, summary.stats.changed);

        let expected = tree
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| n.kind != Kind::LinkDir && !n.odd && tree.reachable(*i))
            .count() as u64
            + 1;
        prop_assert_eq!(summary.stats.changed, expected);
    }

    // A dry run reports exactly what a live run does, and writes nothing.
    #[test]
    fn dry_run_matches_live_run(tree in tree_strategy()) {
        let dry_fs = tree.build();
        let (dry, dry_reporter) = walk(&dry_fs, mutator(Some(OLD), true));
        let live_fs = tree.build();
        let (live, live_reporter) = walk(&live_fs, mutator(Some(OLD), false));

        prop_assert_eq!(dry.stats, live.stats);
        prop_assert_eq!(dry_reporter.events, live_reporter.events);
        prop_assert_eq!(dry_fs.write_count(), 0);
        prop_assert_eq!(live_fs.write_count() as u64, live.stats.changed);
    }

    // Only reachable, well-formed entries owned by the source owner change.
    #[test]
    fn non_matching_owners_untouched(tree in tree_strategy()) {
        let fs = tree.build();
        walk(&fs, mutator(Some(OLD), false));

        for (i, node) in tree.nodes.iter().enumerate() {
            let eligible = node.kind != Kind::LinkDir && !node.odd && tree.reachable(i);
            let expected = if eligible && node.owner == OLD { NEW } else { node.owner };
            prop_assert_eq!(fs.owner_of(&node.path), Some(Sid::unix_user(expected)));
        }

        let root_expected = if tree.root_owner == OLD { NEW } else { tree.root_owner };
        prop_assert_eq!(fs.owner_of(ROOT), Some(Sid::unix_user(root_expected)));
    }
}

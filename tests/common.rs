use gitobj::object::{FileMode, Id, Kind, Signature, Tree, TreeEntry};
use gitobj::repo::{InMemoryRepo, Repo};

pub const FIXTURE_COMMIT_ID: &str = "5fe808e8953c12735680c257f56600cb0de44b10";
pub const FIXTURE_TREE_ID: &str = "967fce8df97cc71722d3c2a5930ef3e6f1d27b12";
pub const FIXTURE_PARENT_ID: &str = "c2792cfa289ae6321ecf2cd5806c2194b0fd070c";

pub const FIXTURE_COMMIT: &[u8] = b"tree 967fce8df97cc71722d3c2a5930ef3e6f1d27b12\n\
    parent c2792cfa289ae6321ecf2cd5806c2194b0fd070c\n\
    author Dave Borowitz <dborowitz@google.com> 1288477363 -0700\n\
    committer Dave Borowitz <dborowitz@google.com> 1288481576 -0700\n\
    \n\
    Second test data commit.\n\
    \n\
    This commit has some additional text.\n";

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn id(hex: &str) -> Id {
    Id::from_hex(hex).unwrap()
}

#[allow(dead_code)]
pub fn signature(name: &str, email: &str, timestamp: i64) -> Signature {
    Signature::new(name, email, timestamp, 0).unwrap()
}

/// Stores a tree holding a single file and returns the tree's ID.
#[allow(dead_code)]
pub fn put_tree(repo: &InMemoryRepo, file_name: &str, content: &[u8]) -> Id {
    let blob_id = repo.put(Kind::Blob, content).unwrap();
    let tree = Tree::new(vec![TreeEntry::new(FileMode::Normal, file_name, blob_id)]).unwrap();
    repo.put(Kind::Tree, tree.as_bytes()).unwrap()
}

mod node;
mod raw_osavl_map;

pub(crate) use node::{Link, Node};
pub(crate) use raw_osavl_map::RawOSAvlMap;

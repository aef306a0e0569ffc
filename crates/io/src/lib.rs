//! Binary file formats of the community detection pipeline.
//!
//! Both formats are little-endian and tightly packed.
//!
//! The adjacency input starts with the vertex count `n` as an `i32`,
//! followed by one record per vertex: its degree `k_i` and then `k_i`
//! strictly ascending neighbor indices, all `i32`. The graph must be
//! symmetric; that is not verified here, only the per-record shape is.
//!
//! The division output starts with the group count as an `i32` (the
//! writer seeks past it first and backfills it last), followed by one
//! record per group: its size and then its members, all `i32`, in the
//! order the partitioner emitted them.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use petgraph::graph::{NodeIndex, UnGraph};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::mem::size_of;
use std::path::Path;
use thiserror::Error;

/// Errors of the adjacency and division codecs.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("vertex count {0} is negative")]
    NegativeVertexCount(i32),

    #[error("vertex {vertex} has negative degree {degree}")]
    NegativeDegree { vertex: usize, degree: i32 },

    #[error("neighbor {neighbor} of vertex {vertex} is out of range for {n} vertices")]
    NeighborOutOfRange {
        vertex: usize,
        neighbor: i32,
        n: usize,
    },

    #[error("neighbors of vertex {vertex} are not strictly ascending")]
    UnsortedNeighbors { vertex: usize },

    #[error("group count {0} is negative")]
    NegativeGroupCount(i32),

    #[error("group size {0} is negative")]
    NegativeGroupSize(i32),

    #[error("group member {0} is negative")]
    NegativeGroupMember(i32),

    #[error("group of {0} vertices does not fit the division encoding")]
    GroupTooLarge(usize),

    #[error("vertex {0} does not fit the division encoding")]
    VertexTooLarge(usize),
}

/// Result type for the codecs.
pub type FormatResult<T> = Result<T, FormatError>;

/// Reads an adjacency file from `reader` into an undirected graph.
///
/// Node indices of the returned graph equal the vertex indices of the
/// file. Each symmetric neighbor pair becomes a single edge; a truncated
/// stream surfaces as an unexpected-EOF i/o error.
pub fn read_adjacency<R: Read>(reader: &mut R) -> FormatResult<UnGraph<(), ()>> {
    let n = reader.read_i32::<LittleEndian>()?;
    if n < 0 {
        return Err(FormatError::NegativeVertexCount(n));
    }
    let n = n as usize;

    let mut graph = UnGraph::with_capacity(n, 0);
    for _ in 0..n {
        graph.add_node(());
    }

    for vertex in 0..n {
        let degree = reader.read_i32::<LittleEndian>()?;
        if degree < 0 {
            return Err(FormatError::NegativeDegree { vertex, degree });
        }

        let mut previous = None;
        for _ in 0..degree {
            let neighbor = reader.read_i32::<LittleEndian>()?;
            if neighbor < 0 || neighbor as usize >= n {
                return Err(FormatError::NeighborOutOfRange {
                    vertex,
                    neighbor,
                    n,
                });
            }
            let neighbor = neighbor as usize;
            if previous.map_or(false, |p| p >= neighbor) {
                return Err(FormatError::UnsortedNeighbors { vertex });
            }
            previous = Some(neighbor);

            // The pair will appear again from the other endpoint; add the
            // edge once.
            if vertex <= neighbor {
                graph.add_edge(NodeIndex::new(vertex), NodeIndex::new(neighbor), ());
            }
        }
    }

    Ok(graph)
}

/// Reads an adjacency file from a path, buffered.
pub fn read_adjacency_path<P: AsRef<Path>>(path: P) -> FormatResult<UnGraph<(), ()>> {
    let mut reader = BufReader::new(File::open(path)?);
    read_adjacency(&mut reader)
}

/// Writes a division file to `writer`.
///
/// Groups are written in the given order; empty groups are skipped. The
/// group count field is written last, so an error part-way leaves the
/// count unwritten and the file invalid.
pub fn write_division<W: Write + Seek>(writer: &mut W, groups: &[Vec<usize>]) -> FormatResult<()> {
    writer.seek(SeekFrom::Start(size_of::<i32>() as u64))?;

    let mut written = 0i32;
    for group in groups {
        if group.is_empty() {
            continue;
        }
        let size =
            i32::try_from(group.len()).map_err(|_| FormatError::GroupTooLarge(group.len()))?;
        writer.write_i32::<LittleEndian>(size)?;
        for &vertex in group {
            let member = i32::try_from(vertex).map_err(|_| FormatError::VertexTooLarge(vertex))?;
            writer.write_i32::<LittleEndian>(member)?;
        }
        written += 1;
    }

    writer.seek(SeekFrom::Start(0))?;
    writer.write_i32::<LittleEndian>(written)?;
    writer.flush()?;
    Ok(())
}

/// Writes a division file to a path, buffered.
pub fn write_division_path<P: AsRef<Path>>(path: P, groups: &[Vec<usize>]) -> FormatResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_division(&mut writer, groups)
}

/// Reads a division file from `reader` back into vertex groups.
pub fn read_division<R: Read>(reader: &mut R) -> FormatResult<Vec<Vec<usize>>> {
    let count = reader.read_i32::<LittleEndian>()?;
    if count < 0 {
        return Err(FormatError::NegativeGroupCount(count));
    }

    let mut groups = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let size = reader.read_i32::<LittleEndian>()?;
        if size < 0 {
            return Err(FormatError::NegativeGroupSize(size));
        }
        let mut group = Vec::with_capacity(size as usize);
        for _ in 0..size {
            let member = reader.read_i32::<LittleEndian>()?;
            if member < 0 {
                return Err(FormatError::NegativeGroupMember(member));
            }
            group.push(member as usize);
        }
        groups.push(group);
    }
    Ok(groups)
}

/// Reads a division file from a path, buffered.
pub fn read_division_path<P: AsRef<Path>>(path: P) -> FormatResult<Vec<Vec<usize>>> {
    let mut reader = BufReader::new(File::open(path)?);
    read_division(&mut reader)
}

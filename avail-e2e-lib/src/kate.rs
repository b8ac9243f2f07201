use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::PrimitiveError, primitives::H256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerDispatchClass {
    pub normal: u32,
    pub operational: u32,
    pub mandatory: u32,
}

/// Block dimensions reported by `kate_blockLength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockLength {
    pub max: PerDispatchClass,
    pub cols: u32,
    pub rows: u32,
    pub chunk_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProof {
    pub root: H256,
    pub proof: Vec<H256>,
    pub number_of_leaves: u32,
    #[serde(alias = "leaf_index")]
    pub leaf_index: u32,
    pub leaf: H256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl FromStr for Cell {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PrimitiveError::InvalidCell(s.to_string());
        let (row, col) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Cell {
            row: row.trim().parse().map_err(|_| invalid())?,
            col: col.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KateCommitment {
    pub rows: u16,
    pub cols: u16,
    pub data_root: H256,
    pub commitment: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLookupIndexItem {
    pub app_id: u32,
    pub start: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLookup {
    pub size: u32,
    pub index: Vec<DataLookupIndexItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1HeaderExtension {
    pub commitment: KateCommitment,
    pub app_lookup: DataLookup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VTHeaderExtension {
    pub new_field: Vec<u8>,
    pub commitment: KateCommitment,
    pub app_lookup: DataLookup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderExtension {
    V1(V1HeaderExtension),
    VTest(VTHeaderExtension),
}

impl HeaderExtension {
    pub fn commitment(&self) -> &KateCommitment {
        match self {
            HeaderExtension::V1(ext) => &ext.commitment,
            HeaderExtension::VTest(ext) => &ext.commitment,
        }
    }

    pub fn app_lookup(&self) -> &DataLookup {
        match self {
            HeaderExtension::V1(ext) => &ext.app_lookup,
            HeaderExtension::VTest(ext) => &ext.app_lookup,
        }
    }
}

//! params/registry.rs
//! Fixed name <-> engine code tables for both directions.
//!
//! Design notes:
//! - One ordered table of `(name, code)` pairs per direction; the position in
//!   the table is the descriptor index, so name and code lookups always agree.
//! - Table lengths are part of their types; adding or dropping a row without
//!   updating the count fails to compile.
//! - Experimental parameters are addressed through the engine's
//!   `experimentalParamN` slots.

use std::fmt;

use zstd_sys::{ZSTD_cParameter, ZSTD_dParameter};

use crate::types::{Direction, Result, ZstdError};

pub const ENCODE_PARAMETER_COUNT: usize = 31;
pub const DECODE_PARAMETER_COUNT: usize = 5;

static ENCODE_PARAMETERS: [(&str, ZSTD_cParameter); ENCODE_PARAMETER_COUNT] = [
    ("compressionLevel", ZSTD_cParameter::ZSTD_c_compressionLevel),
    ("windowLog", ZSTD_cParameter::ZSTD_c_windowLog),
    ("hashLog", ZSTD_cParameter::ZSTD_c_hashLog),
    ("chainLog", ZSTD_cParameter::ZSTD_c_chainLog),
    ("searchLog", ZSTD_cParameter::ZSTD_c_searchLog),
    ("minMatch", ZSTD_cParameter::ZSTD_c_minMatch),
    ("targetLength", ZSTD_cParameter::ZSTD_c_targetLength),
    ("strategy", ZSTD_cParameter::ZSTD_c_strategy),
    ("enableLongDistanceMatching", ZSTD_cParameter::ZSTD_c_enableLongDistanceMatching),
    ("ldmHashLog", ZSTD_cParameter::ZSTD_c_ldmHashLog),
    ("ldmMinMatch", ZSTD_cParameter::ZSTD_c_ldmMinMatch),
    ("ldmBucketSizeLog", ZSTD_cParameter::ZSTD_c_ldmBucketSizeLog),
    ("ldmHashRateLog", ZSTD_cParameter::ZSTD_c_ldmHashRateLog),
    ("contentSizeFlag", ZSTD_cParameter::ZSTD_c_contentSizeFlag),
    ("checksumFlag", ZSTD_cParameter::ZSTD_c_checksumFlag),
    ("dictIDFlag", ZSTD_cParameter::ZSTD_c_dictIDFlag),
    ("nbWorkers", ZSTD_cParameter::ZSTD_c_nbWorkers),
    ("jobSize", ZSTD_cParameter::ZSTD_c_jobSize),
    ("overlapLog", ZSTD_cParameter::ZSTD_c_overlapLog),
    ("rsyncable", ZSTD_cParameter::ZSTD_c_experimentalParam1),
    ("format", ZSTD_cParameter::ZSTD_c_experimentalParam2),
    ("forceMaxWindow", ZSTD_cParameter::ZSTD_c_experimentalParam3),
    ("forceAttachDict", ZSTD_cParameter::ZSTD_c_experimentalParam4),
    ("literalCompressionMode", ZSTD_cParameter::ZSTD_c_experimentalParam5),
    ("targetCBlockSize", ZSTD_cParameter::ZSTD_c_targetCBlockSize),
    ("srcSizeHint", ZSTD_cParameter::ZSTD_c_experimentalParam7),
    ("enableDedicatedDictSearch", ZSTD_cParameter::ZSTD_c_experimentalParam8),
    ("stableInBuffer", ZSTD_cParameter::ZSTD_c_experimentalParam9),
    ("stableOutBuffer", ZSTD_cParameter::ZSTD_c_experimentalParam10),
    ("blockDelimiters", ZSTD_cParameter::ZSTD_c_experimentalParam11),
    ("validateSequences", ZSTD_cParameter::ZSTD_c_experimentalParam12),
];

static DECODE_PARAMETERS: [(&str, ZSTD_dParameter); DECODE_PARAMETER_COUNT] = [
    ("windowLogMax", ZSTD_dParameter::ZSTD_d_windowLogMax),
    ("format", ZSTD_dParameter::ZSTD_d_experimentalParam1),
    ("stableOutBuffer", ZSTD_dParameter::ZSTD_d_experimentalParam2),
    ("forceIgnoreChecksum", ZSTD_dParameter::ZSTD_d_experimentalParam3),
    ("refMultipleDDicts", ZSTD_dParameter::ZSTD_d_experimentalParam4),
];

/// A resolved parameter: direction plus row in that direction's table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterDescriptor {
    direction: Direction,
    index: usize,
}

impl ParameterDescriptor {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        match self.direction {
            Direction::Compress => ENCODE_PARAMETERS[self.index].0,
            Direction::Decompress => DECODE_PARAMETERS[self.index].0,
        }
    }

    /// Engine numeric code of the parameter.
    pub fn code(&self) -> i32 {
        match self.direction {
            Direction::Compress => ENCODE_PARAMETERS[self.index].1 as i32,
            Direction::Decompress => DECODE_PARAMETERS[self.index].1 as i32,
        }
    }

    pub(crate) fn encode_key(&self) -> Result<ZSTD_cParameter> {
        match self.direction {
            Direction::Compress => Ok(ENCODE_PARAMETERS[self.index].1),
            Direction::Decompress => Err(self.wrong_direction(Direction::Compress)),
        }
    }

    pub(crate) fn decode_key(&self) -> Result<ZSTD_dParameter> {
        match self.direction {
            Direction::Decompress => Ok(DECODE_PARAMETERS[self.index].1),
            Direction::Compress => Err(self.wrong_direction(Direction::Decompress)),
        }
    }

    fn wrong_direction(&self, wanted: Direction) -> ZstdError {
        ZstdError::UnknownParameter { direction: wanted, name: self.name().to_owned() }
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name(), self.direction, self.code())
    }
}

fn table_len(direction: Direction) -> usize {
    match direction {
        Direction::Compress => ENCODE_PARAMETER_COUNT,
        Direction::Decompress => DECODE_PARAMETER_COUNT,
    }
}

/// Look a parameter up by its public name.
pub fn resolve(direction: Direction, name: &str) -> Result<ParameterDescriptor> {
    let found = match direction {
        Direction::Compress => ENCODE_PARAMETERS.iter().position(|(n, _)| *n == name),
        Direction::Decompress => DECODE_PARAMETERS.iter().position(|(n, _)| *n == name),
    };
    found
        .map(|index| ParameterDescriptor { direction, index })
        .ok_or_else(|| ZstdError::UnknownParameter { direction, name: name.to_owned() })
}

/// Look a parameter up by its engine code.
pub fn resolve_code(direction: Direction, code: i32) -> Option<ParameterDescriptor> {
    let found = match direction {
        Direction::Compress => ENCODE_PARAMETERS.iter().position(|(_, c)| *c as i32 == code),
        Direction::Decompress => DECODE_PARAMETERS.iter().position(|(_, c)| *c as i32 == code),
    };
    found.map(|index| ParameterDescriptor { direction, index })
}

/// Every descriptor of a direction, in table order.
pub fn descriptors(direction: Direction) -> impl Iterator<Item = ParameterDescriptor> {
    (0..table_len(direction)).map(move |index| ParameterDescriptor { direction, index })
}

pub fn names(direction: Direction) -> impl Iterator<Item = &'static str> {
    descriptors(direction).map(|d| d.name())
}

mod chunk_buffer;
mod chunk_source;

pub use chunk_buffer::ChunkBuffer;
pub use chunk_source::{
    read_u16_be, read_u16_le, read_u32_be, read_u32_le, ChunkSource, MemorySource,
    ReaderSource, DEFAULT_CHUNK_SIZE,
};

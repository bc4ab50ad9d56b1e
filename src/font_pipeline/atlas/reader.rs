use crate::font_pipeline::common::error::Result;
use crate::font_pipeline::pixels::PixelBuffer;

pub trait AtlasReader {
    fn read_atlas(&self, data: &[u8]) -> Result<PixelBuffer>;
}

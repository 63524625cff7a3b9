//! Session-owned copies of the region layout tilemaps.

use std::collections::TryReserveError;

use crate::config::RegionMapConfig;
use crate::display::{AssetId, Background, DisplayDriver};
use crate::types::Region;

const LAYOUT_TILES: usize = RegionMapConfig::LAYOUT_WIDTH * RegionMapConfig::LAYOUT_HEIGHT;
const SCROLL_TILES: usize = RegionMapConfig::SCROLL_BUFFER_WIDTH * RegionMapConfig::LAYOUT_HEIGHT;

/// Switch button tiles: first tile of each row, drawn at column 24 on rows 14..17.
const SWITCH_BUTTON_ROWS: [u16; 3] = [0x0F0, 0x100, 0x110];
const SWITCH_BUTTON_COLUMN: usize = 24;
const SWITCH_BUTTON_TOP_ROW: usize = 14;
const SWITCH_BUTTON_WIDTH: usize = 3;
const SWITCH_BUTTON_PALETTE: u16 = 3;

/// Decompressed layouts, one per region plus the frame, and one scroll
/// buffer per background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutBuffers {
    regions: [Vec<u16>; Region::COUNT],
    frame: Vec<u16>,
    scroll: [Vec<u16>; Background::COUNT],
}

impl LayoutBuffers {
    /// Bytes the session needs for layouts and one scroll buffer per background.
    pub const fn required_bytes() -> usize {
        let tiles = (Region::COUNT + 1) * LAYOUT_TILES + Background::COUNT * SCROLL_TILES;
        tiles * core::mem::size_of::<u16>()
    }

    /// Reserves every buffer up front.
    pub fn reserve() -> Result<Self, TryReserveError> {
        let buffer = |len: usize| -> Result<Vec<u16>, TryReserveError> {
            let mut tiles = Vec::new();
            tiles.try_reserve_exact(len)?;
            Ok(tiles)
        };
        Ok(Self {
            regions: [buffer(LAYOUT_TILES)?, buffer(LAYOUT_TILES)?, buffer(LAYOUT_TILES)?],
            frame: buffer(LAYOUT_TILES)?,
            scroll: [
                buffer(SCROLL_TILES)?,
                buffer(SCROLL_TILES)?,
                buffer(SCROLL_TILES)?,
                buffer(SCROLL_TILES)?,
            ],
        })
    }

    /// Decompresses the layout of `region` into its buffer.
    pub fn decompress_region(&mut self, region: Region, driver: &mut dyn DisplayDriver) {
        let data = driver.decompress_asset(AssetId::RegionTilemap(region));
        fill(&mut self.regions[region.index()], &data);
    }

    pub fn decompress_frame(&mut self, driver: &mut dyn DisplayDriver) {
        let data = driver.decompress_asset(AssetId::FrameTilemap);
        fill(&mut self.frame, &data);
    }

    pub fn region(&self, region: Region) -> &[u16] {
        &self.regions[region.index()]
    }

    /// Map background buffer for `region`, with the switch button drawn when enabled.
    pub fn scroll_buffer(&mut self, region: Region, switch_button: bool) -> &[u16] {
        let buffer = &mut self.scroll[Background::Map.index()];
        widen_into(buffer, &self.regions[region.index()]);
        if switch_button {
            for (row, first) in SWITCH_BUTTON_ROWS.iter().enumerate() {
                let start = (SWITCH_BUTTON_TOP_ROW + row) * RegionMapConfig::SCROLL_BUFFER_WIDTH
                    + SWITCH_BUTTON_COLUMN;
                for (offset, tile) in buffer[start..start + SWITCH_BUTTON_WIDTH].iter_mut().enumerate() {
                    *tile = (SWITCH_BUTTON_PALETTE << 12) | (first + offset as u16);
                }
            }
        }
        buffer
    }

    pub fn frame_buffer(&mut self) -> &[u16] {
        let buffer = &mut self.scroll[Background::Frame.index()];
        widen_into(buffer, &self.frame);
        buffer
    }

    /// Widens a tilemap the driver decompressed into `background`'s scroll buffer.
    pub fn widen_for(&mut self, background: Background, layout: &[u16]) -> &[u16] {
        let buffer = &mut self.scroll[background.index()];
        widen_into(buffer, layout);
        buffer
    }
}

fn fill(buffer: &mut Vec<u16>, data: &[u16]) {
    buffer.clear();
    buffer.extend(data.iter().copied().take(LAYOUT_TILES));
    buffer.resize(LAYOUT_TILES, 0);
}

/// Copies a 30-wide layout into a 32-wide buffer, padding with the first tile.
///
/// `buffer` keeps its reserved capacity; it never grows past one scroll buffer.
fn widen_into(buffer: &mut Vec<u16>, layout: &[u16]) {
    let pad = layout.first().copied().unwrap_or_default();
    buffer.clear();
    for row in 0..RegionMapConfig::LAYOUT_HEIGHT {
        for col in 0..RegionMapConfig::SCROLL_BUFFER_WIDTH {
            let tile = if col < RegionMapConfig::LAYOUT_WIDTH {
                layout
                    .get(row * RegionMapConfig::LAYOUT_WIDTH + col)
                    .copied()
                    .unwrap_or(pad)
            } else {
                pad
            };
            buffer.push(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::VirtualDisplay;

    fn numbered() -> Vec<u16> {
        (0..LAYOUT_TILES as u16).map(|tile| tile + 1).collect()
    }

    #[test]
    fn widen_pads_each_row_with_the_first_tile() {
        let mut layouts = LayoutBuffers::reserve().unwrap();
        let buffer = layouts.widen_for(Background::Overlay, &numbered());
        assert_eq!(buffer.len(), SCROLL_TILES);
        assert_eq!(&buffer[..3], &[1, 2, 3]);
        assert_eq!(buffer[29], 30);
        assert_eq!(&buffer[30..32], &[1, 1]);
        assert_eq!(buffer[32], 31);
    }

    #[test]
    fn decompressed_layouts_are_normalized_to_full_size() {
        let mut driver = VirtualDisplay::new();
        driver.register_asset(AssetId::RegionTilemap(Region::Johto), vec![7; 10]);
        let mut layouts = LayoutBuffers::reserve().unwrap();
        layouts.decompress_region(Region::Johto, &mut driver);
        assert_eq!(layouts.region(Region::Johto).len(), LAYOUT_TILES);
        assert_eq!(layouts.region(Region::Johto)[9], 7);
        assert_eq!(layouts.region(Region::Johto)[10], 0);
    }

    #[test]
    fn switch_button_is_drawn_only_when_enabled() {
        let mut driver = VirtualDisplay::new();
        driver.register_asset(AssetId::RegionTilemap(Region::Rijon), numbered());
        let mut layouts = LayoutBuffers::reserve().unwrap();
        layouts.decompress_region(Region::Rijon, &mut driver);

        let at = 15 * RegionMapConfig::SCROLL_BUFFER_WIDTH + SWITCH_BUTTON_COLUMN + 2;
        let plain = layouts.scroll_buffer(Region::Rijon, false)[at];
        let with_button = layouts.scroll_buffer(Region::Rijon, true)[at];
        assert_eq!(plain, (15 * RegionMapConfig::LAYOUT_WIDTH + 26 + 1) as u16);
        assert_eq!(with_button, 0x3000 | 0x102);
    }

    #[test]
    fn scroll_buffers_stay_within_their_reservation() {
        let mut driver = VirtualDisplay::new();
        driver.register_asset(AssetId::RegionTilemap(Region::Rijon), numbered());
        driver.register_asset(AssetId::FrameTilemap, numbered());
        let mut layouts = LayoutBuffers::reserve().unwrap();
        let reserved: Vec<usize> = layouts.scroll.iter().map(Vec::capacity).collect();
        assert!(reserved.iter().all(|&capacity| capacity >= SCROLL_TILES));

        layouts.decompress_region(Region::Rijon, &mut driver);
        layouts.decompress_frame(&mut driver);
        for _ in 0..3 {
            layouts.scroll_buffer(Region::Rijon, true);
            layouts.frame_buffer();
            layouts.widen_for(Background::Overlay, &numbered());
        }

        let after: Vec<usize> = layouts.scroll.iter().map(Vec::capacity).collect();
        assert_eq!(after, reserved);
    }
}

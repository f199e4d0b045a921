//! The compressed region string.
//!
//! Layout: 8 lowercase hex digits of width, 8 of height, then the
//! [`lz`](crate::lz)-compressed run stream. The grid is cut into
//! [`TILE_WIDTH`] × [`TILE_HEIGHT`] tiles, visited column-major. Within a
//! tile the in-grid cells are visited in [`tile_order`] and described as
//! alternating off/on run lengths, starting with an off run (possibly
//! empty). Each run is the symbol `RUN_OFFSET + length`, and each tile is
//! closed by [`TILE_DELIMITER`].

use swath_region::Region;

use crate::error::CodecError;
use crate::hilbert::tile_order;
use crate::lz;

/// Tile width in cells.
pub const TILE_WIDTH: usize = 256;
/// Tile height in cells.
pub const TILE_HEIGHT: usize = 128;
/// Symbol closing each tile's runs.
pub const TILE_DELIMITER: char = ';';
/// Added to every run length so run symbols never collide with the
/// delimiter.
pub const RUN_OFFSET: u16 = 256;

const HEADER_LEN: usize = 16;

fn tiles_along(cells: usize, tile: usize) -> usize {
    cells.div_ceil(tile)
}

/// In-grid cells of tile `(tx, ty)`, in walk order.
fn tile_cells(
    order: &[(u16, u16)],
    width: usize,
    height: usize,
    tx: usize,
    ty: usize,
) -> impl Iterator<Item = (i32, i32)> + '_ {
    let (x0, y0) = (tx * TILE_WIDTH, ty * TILE_HEIGHT);
    order.iter().filter_map(move |&(dx, dy)| {
        let (x, y) = (x0 + dx as usize, y0 + dy as usize);
        (x < width && y < height).then_some((x as i32, y as i32))
    })
}

/// Encode `region` as a compressed string.
pub fn to_compressed_string(region: &Region) -> String {
    let (width, height) = (region.width(), region.height());
    let order = tile_order();
    let delimiter = TILE_DELIMITER as u16;
    let mut symbols: Vec<u16> = Vec::new();
    let (across, down) = (tiles_along(width, TILE_WIDTH), tiles_along(height, TILE_HEIGHT));
    for tx in 0..across {
        for ty in 0..down {
            let mut on = false;
            let mut run: u16 = 0;
            for (x, y) in tile_cells(order, width, height, tx, ty) {
                if region.get(x, y) != on {
                    symbols.push(RUN_OFFSET + run);
                    run = 0;
                    on = !on;
                }
                run += 1;
            }
            symbols.push(RUN_OFFSET + run);
            symbols.push(delimiter);
        }
    }
    log::debug!(
        "compressing {width}x{height} region: {} tiles, {} symbols",
        across * down,
        symbols.len()
    );
    format!("{width:08x}{height:08x}{}", lz::compress(&symbols))
}

fn parse_dimension(digits: &str, name: &str) -> Result<usize, CodecError> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidHeader {
            reason: format!("{name} {digits:?} is not hexadecimal"),
        });
    }
    u32::from_str_radix(digits, 16)
        .map(|v| v as usize)
        .map_err(|e| CodecError::InvalidHeader {
            reason: format!("{name}: {e}"),
        })
}

/// Decode a string produced by [`to_compressed_string`].
///
/// # Errors
///
/// [`CodecError::InvalidHeader`] if the first 16 chars are not hex,
/// [`CodecError::Truncated`] if the payload ends early, and
/// [`CodecError::Corrupt`] if the payload does not describe exactly the
/// cells of a grid of the stated size.
pub fn decompress(input: &str) -> Result<Region, CodecError> {
    let header = input.get(..HEADER_LEN).ok_or_else(|| CodecError::InvalidHeader {
        reason: format!("expected {HEADER_LEN} hex digits"),
    })?;
    if !header.is_ascii() {
        return Err(CodecError::InvalidHeader {
            reason: "header is not ASCII".into(),
        });
    }
    let width = parse_dimension(&header[..8], "width")?;
    let height = parse_dimension(&header[8..], "height")?;
    let symbols = lz::decompress(&input[HEADER_LEN..])?;

    let (across, down) = if width == 0 || height == 0 {
        (0, 0)
    } else {
        (tiles_along(width, TILE_WIDTH), tiles_along(height, TILE_HEIGHT))
    };
    let delimiter = TILE_DELIMITER as u16;
    let tiles = symbols.iter().filter(|&&s| s == delimiter).count();
    if tiles != across * down || symbols.last().is_some_and(|&s| s != delimiter) {
        return Err(CodecError::Corrupt {
            reason: format!("expected {} tiles, found {tiles}", across * down),
        });
    }

    let mut region = Region::new(width, height);
    let order = tile_order();
    let mut runs = symbols.split(|&s| s == delimiter);
    for tx in 0..across {
        for ty in 0..down {
            let tile_runs = runs.next().unwrap_or(&[]);
            let mut cells = tile_cells(order, width, height, tx, ty);
            let mut on = false;
            for &symbol in tile_runs {
                let len = symbol.checked_sub(RUN_OFFSET).ok_or_else(|| CodecError::Corrupt {
                    reason: format!("symbol {symbol} is not a run length"),
                })?;
                for _ in 0..len {
                    let (x, y) = cells.next().ok_or_else(|| CodecError::Corrupt {
                        reason: format!("runs overflow tile ({tx}, {ty})"),
                    })?;
                    if on {
                        region.insert(x, y);
                    }
                }
                on = !on;
            }
            if cells.next().is_some() {
                return Err(CodecError::Corrupt {
                    reason: format!("runs stop short of the end of tile ({tx}, {ty})"),
                });
            }
        }
    }
    Ok(region)
}

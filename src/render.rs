use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;

use crate::color::LinearColor;
use crate::config::Extent;
use crate::config::Window;
use crate::world::World;

const TOP_LEFT: char = '╔';
const TOP_RIGHT: char = '╗';
const BOTTOM_LEFT: char = '╚';
const BOTTOM_RIGHT: char = '╝';
const HORIZONTAL: char = '═';
const VERTICAL: char = '║';

/// Bytes needed for one terminal cell: two 24 bit color escapes of at most 19 bytes, a 3 byte
/// glyph and a 4 byte reset.
const CELL_BYTES: usize = 2 * 19 + 3 + 4;

fn rgb(color: LinearColor) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb { r, g, b }
}

/// Serializes a [`World`] into a single frame, bordered and centered in the terminal.
pub struct Renderer {
    extent: Extent,

    /// Blank lines above the frame
    top: usize,

    /// Blank columns left of the frame
    left: usize,

    /// The frame buffer. Reused across frames.
    fb: Vec<u8>,
}

impl Renderer {
    pub fn new(extent: Extent, window: Window) -> Self {
        // `window.height` and `extent.height` count sub-rows, two per terminal row. Half of the
        // spare terminal rows go above the frame.
        let top = window.height.saturating_sub(extent.height) / 4;
        let left = window.width.saturating_sub(extent.width) / 2;

        Self {
            extent,
            top,
            left,
            fb: Vec::with_capacity(extent.width * extent.rows() * CELL_BYTES),
        }
    }

    /// Build the frame for `world`, starting with the cursor back home and hidden.
    pub fn frame(&mut self, world: &World) -> io::Result<&[u8]> {
        debug_assert_eq!(world.width(), self.extent.width);

        let fb = &mut self.fb;
        fb.clear();

        queue!(fb, cursor::MoveTo(0, 0), cursor::Hide)?;

        for _ in 0..self.top {
            fb.push(b'\n');
        }

        Self::border(fb, self.left, self.extent.width, TOP_LEFT, TOP_RIGHT)?;
        fb.push(b'\n');

        for row in world.rows() {
            Self::pad(fb, self.left);
            write!(fb, "{VERTICAL}")?;

            for cell in row {
                let look = cell.look;

                queue!(
                    fb,
                    style::SetForegroundColor(rgb(look.fg)),
                    style::SetBackgroundColor(rgb(look.bg)),
                    style::Print(look.glyph.as_char()),
                    style::ResetColor,
                )?;
            }

            write!(fb, "{VERTICAL}")?;
            fb.push(b'\n');
        }

        Self::border(fb, self.left, self.extent.width, BOTTOM_LEFT, BOTTOM_RIGHT)?;

        Ok(&self.fb)
    }

    /// Write a frame for `world` to `out` in one go.
    pub fn draw<W: Write + ?Sized>(&mut self, world: &World, out: &mut W) -> io::Result<()> {
        let frame = self.frame(world)?;

        out.write_all(frame)?;
        out.flush()
    }

    fn pad(fb: &mut Vec<u8>, n: usize) {
        fb.resize(fb.len() + n, b' ');
    }

    fn border(fb: &mut Vec<u8>, left: usize, width: usize, l: char, r: char) -> io::Result<()> {
        Self::pad(fb, left);
        write!(fb, "{l}")?;

        for _ in 0..width {
            write!(fb, "{HORIZONTAL}")?;
        }

        write!(fb, "{r}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::life::Life;

    const HOME_HIDE: &[u8] = b"\x1b[1;1H\x1b[?25l";

    /// Drop escape sequences, keeping only what ends up on screen.
    fn visible(frame: &[u8]) -> String {
        console::strip_ansi_codes(std::str::from_utf8(frame).unwrap()).into_owned()
    }

    #[test]
    fn starts_with_cursor_reset() {
        let extent = Extent::new(8, 4);
        let mut renderer = Renderer::new(extent, Window { width: 8, height: 4 });
        let frame = renderer.frame(&World::new(extent)).unwrap();

        assert!(frame.starts_with(HOME_HIDE));
    }

    #[test]
    fn bordered_and_centered() {
        let extent = Extent::new(8, 4);
        let mut renderer = Renderer::new(extent, Window { width: 13, height: 9 });
        let frame = renderer.frame(&World::new(extent)).unwrap();
        let lines: Vec<String> = visible(frame).split('\n').map(String::from).collect();

        // (9 - 4) / 4 = 1 blank line, (13 - 8) / 2 = 2 blank columns
        assert_eq!(
            lines,
            vec![
                "",
                "  ╔════════╗",
                "  ║        ║",
                "  ║        ║",
                "  ╚════════╝",
            ]
        );
    }

    #[test]
    fn oversized_extent_is_not_padded() {
        let extent = Extent::new(16, 8);
        let mut renderer = Renderer::new(extent, Window { width: 8, height: 4 });
        let frame = renderer.frame(&World::new(extent)).unwrap();

        assert!(visible(frame).starts_with("╔═"));
    }

    #[test]
    fn cell_escapes() {
        let extent = Extent::new(8, 2);
        let mut world = World::new(extent);
        world.ingest(Life::with_cells(extent, [(0, 0), (0, 1)]).current());

        let mut renderer = Renderer::new(extent, Window { width: 8, height: 2 });
        let frame = renderer.frame(&world).unwrap();
        let full = "\x1b[38;2;255;255;255m\x1b[48;2;255;255;255m█\x1b[0m";

        let text = std::str::from_utf8(frame).unwrap();
        assert!(text.contains(&format!("║{full}")), "{text:?}");
    }

    #[test]
    fn single_write() {
        struct Counter {
            writes: usize,
            bytes: Vec<u8>,
        }

        impl Write for Counter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.writes += 1;
                self.bytes.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let extent = Extent::new(8, 4);
        let world = World::new(extent);
        let mut renderer = Renderer::new(extent, Window { width: 8, height: 4 });
        let mut out = Counter {
            writes: 0,
            bytes: Vec::new(),
        };

        renderer.draw(&world, &mut out).unwrap();

        assert_eq!(out.writes, 1);
        assert_eq!(out.bytes, renderer.frame(&world).unwrap());
    }
}

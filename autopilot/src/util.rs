use anyhow::{anyhow, Context, Result};
use galaga_core::Viewport;

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}")),
        None => s
            .parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}")),
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let seeds = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_seed)
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

/// `count` consecutive seeds starting at `start`, wrapping at `u32::MAX`.
pub fn seed_range(start: u32, count: u32) -> Vec<u32> {
    (0..count).map(|offset| start.wrapping_add(offset)).collect()
}

/// Parses `WIDTHxHEIGHT` in pixels, e.g. `1920x1080`.
pub fn parse_viewport(raw: &str) -> Result<Viewport> {
    let s = raw.trim();
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("viewport must look like WIDTHxHEIGHT, got '{s}'"))?;
    let width: f64 = w
        .trim()
        .parse()
        .with_context(|| format!("invalid viewport width in '{s}'"))?;
    let height: f64 = h
        .trim()
        .parse()
        .with_context(|| format!("invalid viewport height in '{s}'"))?;
    if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
        return Err(anyhow!("viewport dimensions must be >= 1, got '{s}'"));
    }
    Ok(Viewport::new(width, height))
}

pub fn parse_viewport_csv(input: &str) -> Result<Vec<Viewport>> {
    let viewports = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_viewport)
        .collect::<Result<Vec<_>>>()?;
    if viewports.is_empty() {
        return Err(anyhow!("no viewports parsed from --viewports"));
    }
    Ok(viewports)
}

pub fn viewport_label(viewport: &Viewport) -> String {
    format!("{}x{}", viewport.width, viewport.height)
}

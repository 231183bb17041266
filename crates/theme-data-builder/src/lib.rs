/*
 * theme-data-builder
 * Copyright (c) 2025 Posit, PBC
 *
 * Build-time generator for the themes site data file.
 *
 * Walks the versioned theme trees (`v<N>` directories), resolves each
 * theme's inheritance chain, collects its README and sample
 * configuration, and writes the aggregate to `output/theme_data.js` as
 * a `var data = {...}` script include with sorted keys and pure-ASCII
 * escaping.
 */

pub mod builder;
pub mod emit;
pub mod highlight;
pub mod versions;

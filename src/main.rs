// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Curvedit: replay a gesture script and print the resulting curves

fn main() -> anyhow::Result<()> {
    curvedit::run()
}

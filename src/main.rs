// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Camera Measure: scripted replay of overlay measurements

fn main() -> anyhow::Result<()> {
    camera_measure::run()
}

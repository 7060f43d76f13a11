// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use guide2af3::errors::JobError;

fn main() -> Result<(), JobError> {
    guide2af3::run()
}

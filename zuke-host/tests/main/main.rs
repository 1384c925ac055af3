mod lifecycle;
mod outlines;
mod registry;
mod reporting;

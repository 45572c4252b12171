pub mod chart;
pub mod dataframe;
pub mod sink;

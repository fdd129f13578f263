pub mod matrixfuncs;

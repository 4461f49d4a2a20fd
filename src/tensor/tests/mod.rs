mod arithmetic;
mod reduce;

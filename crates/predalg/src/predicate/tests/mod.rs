mod connective;
mod property;

mod inference;

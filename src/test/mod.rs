mod ai;

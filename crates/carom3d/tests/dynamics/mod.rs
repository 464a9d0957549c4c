mod flipper_stroke;
